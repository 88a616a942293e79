//! In-memory row store for one calendar session.
//!
//! The store is an explicit object owned by its caller; `upsert`, `remove`
//! and `replace_all` are its entire mutation surface.

use crate::calendar::{CalendarRow, RowId};

/// Ordered collection of calendar rows keyed by [`RowId`].
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    rows: Vec<CalendarRow>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `row`, or replace the row with the same id in place.
    pub fn upsert(&mut self, row: CalendarRow) {
        match self.rows.iter_mut().find(|existing| existing.id == row.id) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }

    /// Remove the row with `id`, returning it if it was present.
    pub fn remove(&mut self, id: &RowId) -> Option<CalendarRow> {
        let index = self.rows.iter().position(|row| &row.id == id)?;
        Some(self.rows.remove(index))
    }

    /// Swap the row stored under `old_id` for `row` at the same position.
    ///
    /// Used when a draft receives its server id. Returns `false` and leaves
    /// the store untouched when `old_id` is no longer present.
    pub fn replace(&mut self, old_id: &RowId, row: CalendarRow) -> bool {
        match self.rows.iter().position(|existing| &existing.id == old_id) {
            Some(index) => {
                self.rows[index] = row;
                true
            }
            None => false,
        }
    }

    /// Discard the current rows and load `rows` in the given order.
    pub fn replace_all(&mut self, rows: Vec<CalendarRow>) {
        self.rows = rows;
    }

    pub fn get(&self, id: &RowId) -> Option<&CalendarRow> {
        self.rows.iter().find(|row| &row.id == id)
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.get(id).is_some()
    }

    pub fn list(&self) -> &[CalendarRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
