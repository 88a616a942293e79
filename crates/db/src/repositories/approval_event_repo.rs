//! Repository for the `calendar_row_approval_events` table.

use cadence_core::types::DbId;
use sqlx::PgPool;

use crate::models::approval_event::ApprovalEvent;

const EVENT_COLUMNS: &str =
    "id, row_id, user_id, role, scope, field, approved, decided_at";

/// Read access to approval history. Events are written by
/// [`CalendarRowRepo::set_approval`](crate::repositories::CalendarRowRepo::set_approval)
/// in the same transaction as the flag change.
pub struct ApprovalEventRepo;

impl ApprovalEventRepo {
    /// List every approval change for a row, newest first.
    pub async fn list_for_row(
        pool: &PgPool,
        row_id: DbId,
    ) -> Result<Vec<ApprovalEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM calendar_row_approval_events
             WHERE row_id = $1
             ORDER BY decided_at DESC, id DESC"
        );
        sqlx::query_as::<_, ApprovalEvent>(&query)
            .bind(row_id)
            .fetch_all(pool)
            .await
    }
}
