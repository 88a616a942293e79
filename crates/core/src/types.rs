/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Identifier of a content calendar (one client, one month of posts).
pub type CalendarId = DbId;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
