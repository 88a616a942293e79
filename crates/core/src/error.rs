//! Domain-level error type shared by the db and api layers.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A calendar, row, or other entity does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed validation (bad role name, empty title, unknown scope).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
