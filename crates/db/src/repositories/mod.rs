//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod approval_event_repo;
pub mod calendar_repo;
pub mod calendar_row_repo;

pub use approval_event_repo::ApprovalEventRepo;
pub use calendar_repo::CalendarRepo;
pub use calendar_row_repo::{ApprovalChange, CalendarRowRepo, SetApprovalError};
