//! Repository for the `calendar_rows` table.

use cadence_core::approval::{self, ApprovalError, ApprovalField, Scope};
use cadence_core::calendar::{CalendarRow, NewRow};
use cadence_core::roles::Role;
use cadence_core::types::{CalendarId, DbId};
use sqlx::PgPool;

use crate::models::calendar_row::{CalendarRowRecord, UpdateCalendarRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, calendar_id, scheduled_for, tagline, caption, hashtags, \
    engagement_hooks, creative_caption_text, creatives, \
    internal_content_approval, internal_creatives_approval, \
    client_content_approval, client_creatives_approval, created_at, updated_at";

/// Failure modes of [`CalendarRowRepo::set_approval`].
#[derive(Debug, thiserror::Error)]
pub enum SetApprovalError {
    /// The state machine refused the transition against the locked row.
    #[error(transparent)]
    Approval(#[from] ApprovalError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// An approval change requested by an authenticated user.
#[derive(Debug, Clone, Copy)]
pub struct ApprovalChange {
    pub scope: Scope,
    pub field: ApprovalField,
    pub value: bool,
    pub role: Role,
    pub user_id: DbId,
}

/// Provides CRUD and approval operations for calendar rows.
pub struct CalendarRowRepo;

impl CalendarRowRepo {
    /// Insert a new row with all approval flags cleared.
    pub async fn create(
        pool: &PgPool,
        calendar_id: CalendarId,
        input: &NewRow,
    ) -> Result<CalendarRow, sqlx::Error> {
        let content = &input.content_fields;
        let query = format!(
            "INSERT INTO calendar_rows
                (calendar_id, scheduled_for, tagline, caption, hashtags,
                 engagement_hooks, creative_caption_text, creatives)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, CalendarRowRecord>(&query)
            .bind(calendar_id)
            .bind(input.scheduled_for)
            .bind(&content.tagline)
            .bind(&content.caption)
            .bind(&content.hashtags)
            .bind(&content.engagement_hooks)
            .bind(&content.creative_caption_text)
            .bind(&input.creatives)
            .fetch_one(pool)
            .await?;
        Ok(record.into_row())
    }

    /// Find a row, scoped to its calendar.
    pub async fn find_in_calendar(
        pool: &PgPool,
        calendar_id: CalendarId,
        id: DbId,
    ) -> Result<Option<CalendarRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM calendar_rows WHERE id = $1 AND calendar_id = $2");
        let record = sqlx::query_as::<_, CalendarRowRecord>(&query)
            .bind(id)
            .bind(calendar_id)
            .fetch_optional(pool)
            .await?;
        Ok(record.map(CalendarRowRecord::into_row))
    }

    /// List a calendar's rows by schedule date, unscheduled rows last.
    pub async fn list_for_calendar(
        pool: &PgPool,
        calendar_id: CalendarId,
    ) -> Result<Vec<CalendarRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calendar_rows
             WHERE calendar_id = $1
             ORDER BY scheduled_for ASC NULLS LAST, id ASC"
        );
        let records = sqlx::query_as::<_, CalendarRowRecord>(&query)
            .bind(calendar_id)
            .fetch_all(pool)
            .await?;
        Ok(records.into_iter().map(CalendarRowRecord::into_row).collect())
    }

    /// Update a row's content. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no such row exists in the calendar.
    pub async fn update_content(
        pool: &PgPool,
        calendar_id: CalendarId,
        id: DbId,
        input: &UpdateCalendarRow,
    ) -> Result<Option<CalendarRow>, sqlx::Error> {
        let query = format!(
            "UPDATE calendar_rows SET
                scheduled_for = COALESCE($3, scheduled_for),
                tagline = COALESCE($4, tagline),
                caption = COALESCE($5, caption),
                hashtags = COALESCE($6, hashtags),
                engagement_hooks = COALESCE($7, engagement_hooks),
                creative_caption_text = COALESCE($8, creative_caption_text),
                creatives = COALESCE($9, creatives)
             WHERE id = $1 AND calendar_id = $2
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, CalendarRowRecord>(&query)
            .bind(id)
            .bind(calendar_id)
            .bind(input.scheduled_for)
            .bind(&input.tagline)
            .bind(&input.caption)
            .bind(&input.hashtags)
            .bind(&input.engagement_hooks)
            .bind(&input.creative_caption_text)
            .bind(&input.creatives)
            .fetch_optional(pool)
            .await?;
        Ok(record.map(CalendarRowRecord::into_row))
    }

    /// Delete a row and its approval history. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, calendar_id: CalendarId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM calendar_rows WHERE id = $1 AND calendar_id = $2")
            .bind(id)
            .bind(calendar_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply an approval change under a row lock.
    ///
    /// The row is read with `FOR UPDATE`, the state machine decides against
    /// that locked copy, and the flags plus an approval event are written in
    /// the same transaction. Concurrent changes to one row are serialized,
    /// so a client approval can never commit against a stale internal flag.
    ///
    /// Setting a flag to the value it already holds is a no-op that records
    /// no event. Returns `Ok(None)` if the row does not exist.
    pub async fn set_approval(
        pool: &PgPool,
        calendar_id: CalendarId,
        id: DbId,
        change: ApprovalChange,
    ) -> Result<Option<CalendarRow>, SetApprovalError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM calendar_rows
             WHERE id = $1 AND calendar_id = $2
             FOR UPDATE"
        );
        let Some(record) = sqlx::query_as::<_, CalendarRowRecord>(&query)
            .bind(id)
            .bind(calendar_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let current = record.into_row();
        let next = approval::set_approval(
            &current,
            change.scope,
            change.field,
            change.value,
            change.role,
        )?;
        if next == current {
            tx.commit().await?;
            return Ok(Some(current));
        }

        let query = format!(
            "UPDATE calendar_rows SET
                internal_content_approval = $2,
                internal_creatives_approval = $3,
                client_content_approval = $4,
                client_creatives_approval = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, CalendarRowRecord>(&query)
            .bind(id)
            .bind(next.internal_status.content_approval)
            .bind(next.internal_status.creatives_approval)
            .bind(next.client_status.content_approval)
            .bind(next.client_status.creatives_approval)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO calendar_row_approval_events
                (row_id, user_id, role, scope, field, approved)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(change.user_id)
        .bind(change.role.as_str())
        .bind(change.scope.as_str())
        .bind(change.field.as_str())
        .bind(change.value)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            row_id = id,
            scope = %change.scope,
            field = %change.field,
            value = change.value,
            "Approval flag written"
        );
        Ok(Some(updated.into_row()))
    }
}
