//! Handlers for the calendar row approval workflow.
//!
//! Provides the approval endpoint itself plus read-only views: the per-row
//! approval history, the control states for the caller's role, and a
//! calendar-wide progress summary.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use cadence_core::approval::{self, ApprovalError, ApprovalField, Scope};
use cadence_core::error::CoreError;
use cadence_core::roles::can_act;
use cadence_core::summary::summarize;
use cadence_core::types::{CalendarId, DbId};
use cadence_db::repositories::{ApprovalChange, ApprovalEventRepo, CalendarRowRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::calendar::ensure_calendar_exists;
use crate::handlers::calendar_row::ensure_row_exists;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for setting one approval flag.
#[derive(Debug, Deserialize)]
pub struct SetApprovalRequest {
    pub value: bool,
}

/// PATCH /api/v1/calendars/{calendar_id}/rows/{row_id}/approvals/{scope}/{field}
///
/// Set one approval flag. The caller's role must own `scope` (403
/// otherwise) and the flag must be ready (422 otherwise). Returns the full
/// updated row.
pub async fn set_approval(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((calendar_id, row_id, scope, field)): Path<(CalendarId, DbId, String, String)>,
    Json(input): Json<SetApprovalRequest>,
) -> AppResult<impl IntoResponse> {
    let scope: Scope = scope.parse()?;
    let field: ApprovalField = field.parse()?;

    if !can_act(auth.role, scope) {
        tracing::warn!(
            user_id = auth.user_id,
            role = %auth.role,
            %scope,
            "Approval change refused: role does not own scope"
        );
        return Err(AppError::Approval(ApprovalError::Unauthorized {
            role: auth.role,
            scope,
        }));
    }

    let change = ApprovalChange {
        scope,
        field,
        value: input.value,
        role: auth.role,
        user_id: auth.user_id,
    };

    let row = CalendarRowRepo::set_approval(&state.pool, calendar_id, row_id, change)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CalendarRow",
            id: row_id,
        }))?;

    tracing::info!(
        user_id = auth.user_id,
        calendar_id,
        row_id,
        %scope,
        %field,
        value = input.value,
        "Approval set"
    );

    Ok(Json(DataResponse { data: row }))
}

/// GET /api/v1/calendars/{calendar_id}/rows/{row_id}/approvals
///
/// List committed approval changes for a row, newest first.
pub async fn list_approval_events(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((calendar_id, row_id)): Path<(CalendarId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_row_exists(&state.pool, calendar_id, row_id).await?;
    let events = ApprovalEventRepo::list_for_row(&state.pool, row_id).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/calendars/{calendar_id}/rows/{row_id}/controls
///
/// The four approval controls of a row as seen by the caller's role.
pub async fn get_controls(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((calendar_id, row_id)): Path<(CalendarId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let row = ensure_row_exists(&state.pool, calendar_id, row_id).await?;
    let controls = approval::controls(&row, auth.role);
    Ok(Json(DataResponse { data: controls }))
}

/// GET /api/v1/calendars/{calendar_id}/approval-summary
pub async fn get_approval_summary(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(calendar_id): Path<CalendarId>,
) -> AppResult<impl IntoResponse> {
    ensure_calendar_exists(&state.pool, calendar_id).await?;
    let rows = CalendarRowRepo::list_for_calendar(&state.pool, calendar_id).await?;
    Ok(Json(DataResponse {
        data: summarize(&rows),
    }))
}
