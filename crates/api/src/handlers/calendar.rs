//! Handlers for content calendars.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cadence_core::error::CoreError;
use cadence_core::types::{CalendarId, DbId};
use cadence_db::models::calendar::{Calendar, CreateCalendar};
use cadence_db::repositories::CalendarRepo;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Verify that a calendar exists, returning it or a 404.
pub async fn ensure_calendar_exists(pool: &PgPool, id: CalendarId) -> AppResult<Calendar> {
    CalendarRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Calendar",
            id,
        })
    })
}

/// POST /api/v1/calendars
pub async fn create_calendar(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCalendar>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let calendar = CalendarRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        calendar_id = calendar.id,
        month = %calendar.month,
        "Calendar created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: calendar })))
}

/// GET /api/v1/calendars
pub async fn list_calendars(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let calendars = CalendarRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: calendars }))
}

/// GET /api/v1/calendars/{calendar_id}
pub async fn get_calendar(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let calendar = ensure_calendar_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: calendar }))
}
