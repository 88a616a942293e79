//! Route definitions for calendars, their rows, and row approvals.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{approval, calendar, calendar_row};
use crate::state::AppState;

/// Calendar routes, nested under `/calendars`.
///
/// ```text
/// GET    /                                                  list_calendars
/// POST   /                                                  create_calendar
/// GET    /{calendar_id}                                     get_calendar
/// GET    /{calendar_id}/approval-summary                    get_approval_summary
/// GET    /{calendar_id}/rows                                list_rows
/// POST   /{calendar_id}/rows                                create_row
/// GET    /{calendar_id}/rows/{row_id}                       get_row
/// PUT    /{calendar_id}/rows/{row_id}                       update_row
/// DELETE /{calendar_id}/rows/{row_id}                       delete_row
/// GET    /{calendar_id}/rows/{row_id}/controls              get_controls
/// GET    /{calendar_id}/rows/{row_id}/approvals             list_approval_events
/// PATCH  /{calendar_id}/rows/{row_id}/approvals/{scope}/{field}  set_approval
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(calendar::list_calendars).post(calendar::create_calendar),
        )
        .route("/{calendar_id}", get(calendar::get_calendar))
        .route(
            "/{calendar_id}/approval-summary",
            get(approval::get_approval_summary),
        )
        .route(
            "/{calendar_id}/rows",
            get(calendar_row::list_rows).post(calendar_row::create_row),
        )
        .route(
            "/{calendar_id}/rows/{row_id}",
            get(calendar_row::get_row)
                .put(calendar_row::update_row)
                .delete(calendar_row::delete_row),
        )
        .route(
            "/{calendar_id}/rows/{row_id}/controls",
            get(approval::get_controls),
        )
        .route(
            "/{calendar_id}/rows/{row_id}/approvals",
            get(approval::list_approval_events),
        )
        .route(
            "/{calendar_id}/rows/{row_id}/approvals/{scope}/{field}",
            patch(approval::set_approval),
        )
}
