//! Content calendar entity model and DTOs.

use cadence_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `calendars` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Calendar {
    pub id: DbId,
    pub client_name: String,
    pub title: String,
    /// First day of the month the calendar covers.
    pub month: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new calendar.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCalendar {
    #[validate(length(min = 1, max = 200))]
    pub client_name: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub month: NaiveDate,
}
