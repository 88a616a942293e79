//! Handlers for the rows of a content calendar.
//!
//! Rows are read and written in the nested shape clients hold locally
//! (`contentFields`, `internalStatus`, `clientStatus`). Approval flags are
//! never writable through these endpoints; see [`super::approval`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cadence_core::calendar::{CalendarRow, NewRow};
use cadence_core::error::CoreError;
use cadence_core::types::{CalendarId, DbId};
use cadence_db::models::calendar_row::UpdateCalendarRow;
use cadence_db::repositories::CalendarRowRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::calendar::ensure_calendar_exists;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a row scoped to its calendar, or 404.
pub async fn ensure_row_exists(
    pool: &PgPool,
    calendar_id: CalendarId,
    row_id: DbId,
) -> AppResult<CalendarRow> {
    CalendarRowRepo::find_in_calendar(pool, calendar_id, row_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "CalendarRow",
                id: row_id,
            })
        })
}

/// GET /api/v1/calendars/{calendar_id}/rows
pub async fn list_rows(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(calendar_id): Path<CalendarId>,
) -> AppResult<impl IntoResponse> {
    ensure_calendar_exists(&state.pool, calendar_id).await?;
    let rows = CalendarRowRepo::list_for_calendar(&state.pool, calendar_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/calendars/{calendar_id}/rows
///
/// New rows always start with every approval flag cleared.
pub async fn create_row(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(calendar_id): Path<CalendarId>,
    Json(input): Json<NewRow>,
) -> AppResult<impl IntoResponse> {
    ensure_calendar_exists(&state.pool, calendar_id).await?;

    let row = CalendarRowRepo::create(&state.pool, calendar_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        calendar_id,
        row_id = %row.id,
        "Calendar row created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// GET /api/v1/calendars/{calendar_id}/rows/{row_id}
pub async fn get_row(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((calendar_id, row_id)): Path<(CalendarId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let row = ensure_row_exists(&state.pool, calendar_id, row_id).await?;
    Ok(Json(DataResponse { data: row }))
}

/// PUT /api/v1/calendars/{calendar_id}/rows/{row_id}
///
/// Edits content only. Existing approvals are kept.
pub async fn update_row(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((calendar_id, row_id)): Path<(CalendarId, DbId)>,
    Json(input): Json<UpdateCalendarRow>,
) -> AppResult<impl IntoResponse> {
    let row = CalendarRowRepo::update_content(&state.pool, calendar_id, row_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CalendarRow",
            id: row_id,
        }))?;

    tracing::info!(user_id = auth.user_id, calendar_id, row_id, "Calendar row updated");

    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/calendars/{calendar_id}/rows/{row_id}
pub async fn delete_row(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((calendar_id, row_id)): Path<(CalendarId, DbId)>,
) -> AppResult<impl IntoResponse> {
    if !CalendarRowRepo::delete(&state.pool, calendar_id, row_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CalendarRow",
            id: row_id,
        }));
    }

    tracing::info!(user_id = auth.user_id, calendar_id, row_id, "Calendar row deleted");

    Ok(StatusCode::NO_CONTENT)
}
