//! Route definitions for the `/leaves` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::leave;
use crate::state::AppState;

/// Routes mounted at `/leaves`.
///
/// ```text
/// POST /add                  -> file (auth)
/// GET  /                     -> list (admin, paginated)
/// GET  /{id}/view            -> get (admin)
/// PUT  /{id}/update-status   -> set_status (admin)
/// GET  /{id}/employee        -> for_employee (auth, identity or employee id)
/// GET  /{id}/leaves          -> by_employee_id (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leave::list))
        .route("/add", post(leave::file))
        .route("/{id}/view", get(leave::get))
        .route("/{id}/update-status", put(leave::set_status))
        .route("/{id}/employee", get(leave::for_employee))
        .route("/{id}/leaves", get(leave::by_employee_id))
}
