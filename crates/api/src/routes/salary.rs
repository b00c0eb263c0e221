//! Route definitions for the `/salary` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::salary;
use crate::state::AppState;

/// Routes mounted at `/salary`. All require auth.
///
/// ```text
/// GET  /                    -> list (paginated, search by employee name)
/// POST /add                 -> add
/// GET  /{emp_id}/history    -> history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(salary::list))
        .route("/add", post(salary::add))
        .route("/{emp_id}/history", get(salary::history))
}
