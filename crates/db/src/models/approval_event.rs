//! Approval history model (one entry per committed flag change).

use cadence_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `calendar_row_approval_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApprovalEvent {
    pub id: DbId,
    pub row_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub scope: String,
    pub field: String,
    /// The value the flag was set to.
    pub approved: bool,
    pub decided_at: Timestamp,
}
