//! Repository for the `calendars` table.

use cadence_core::types::DbId;
use sqlx::PgPool;

use crate::models::calendar::{Calendar, CreateCalendar};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_name, title, month, created_at, updated_at";

/// Provides create and read operations for calendars.
pub struct CalendarRepo;

impl CalendarRepo {
    /// Insert a new calendar, returning the created row.
    ///
    /// The month is normalised to its first day.
    pub async fn create(pool: &PgPool, input: &CreateCalendar) -> Result<Calendar, sqlx::Error> {
        let query = format!(
            "INSERT INTO calendars (client_name, title, month)
             VALUES ($1, $2, date_trunc('month', $3::date)::date)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Calendar>(&query)
            .bind(&input.client_name)
            .bind(&input.title)
            .bind(input.month)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Calendar>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM calendars WHERE id = $1");
        sqlx::query_as::<_, Calendar>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all calendars, most recent month first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Calendar>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM calendars ORDER BY month DESC, client_name ASC");
        sqlx::query_as::<_, Calendar>(&query).fetch_all(pool).await
    }
}
