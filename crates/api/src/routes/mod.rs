pub mod calendar;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /calendars                                                  list, create
/// /calendars/{calendar_id}                                    get
/// /calendars/{calendar_id}/approval-summary                   approval progress
/// /calendars/{calendar_id}/rows                               list, create
/// /calendars/{calendar_id}/rows/{row_id}                      get, update, delete
/// /calendars/{calendar_id}/rows/{row_id}/controls             approval controls for caller
/// /calendars/{calendar_id}/rows/{row_id}/approvals            approval history
/// /calendars/{calendar_id}/rows/{row_id}/approvals/{scope}/{field}
///                                                             set approval (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/calendars", calendar::router())
}
