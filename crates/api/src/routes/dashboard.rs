//! Route definitions for the `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /summary          -> overview (admin)
/// GET /{id}/summary     -> employee_summary (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(dashboard::overview))
        .route("/{id}/summary", get(dashboard::employee_summary))
}
