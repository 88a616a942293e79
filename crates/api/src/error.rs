use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cadence_core::approval::ApprovalError;
use cadence_core::error::CoreError;
use cadence_db::repositories::SetApprovalError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`ApprovalError`] for domain errors and sqlx
/// errors from the repositories. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cadence_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The approval state machine refused a transition.
    #[error(transparent)]
    Approval(#[from] ApprovalError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<SetApprovalError> for AppError {
    fn from(err: SetApprovalError) -> Self {
        match err {
            SetApprovalError::Approval(e) => AppError::Approval(e),
            SetApprovalError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Approval state machine ---
            AppError::Approval(err) => classify_approval_error(err),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an approval refusal into an HTTP status, error code, and message.
///
/// Readiness failures use 422 with `NOT_READY` so callers can tell a row
/// that is incomplete apart from a malformed request.
fn classify_approval_error(err: &ApprovalError) -> (StatusCode, &'static str, String) {
    match err {
        ApprovalError::Unauthorized { .. } => {
            (StatusCode::FORBIDDEN, "FORBIDDEN", err.to_string())
        }
        ApprovalError::NotReady { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "NOT_READY", err.to_string())
        }
        ApprovalError::Pending { .. } => (StatusCode::CONFLICT, "CONFLICT", err.to_string()),
        ApprovalError::RowNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        ApprovalError::Unsaved(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string()),
        ApprovalError::PersistenceFailed(msg) => {
            tracing::error!(error = %msg, "Approval persistence failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Foreign key violations map to 404; the referenced calendar is gone.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            // Foreign key violation: 23503
            if db_err.code().as_deref() == Some("23503") {
                return (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Referenced resource not found".to_string(),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
