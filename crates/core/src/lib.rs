//! Cadence domain core.
//!
//! Pure approval-workflow logic for content calendars: roles, readiness,
//! the approval state machine, the in-memory row store, and the traits the
//! workflow uses to talk to persistence and identity. Nothing in this crate
//! performs I/O directly.

pub mod approval;
pub mod calendar;
pub mod error;
pub mod gateway;
pub mod roles;
pub mod store;
pub mod summary;
pub mod types;
pub mod workflow;
