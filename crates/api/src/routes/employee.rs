//! Route definitions for the `/employees` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::employee;
use crate::state::AppState;

/// Routes mounted at `/employees`.
///
/// ```text
/// GET    /                   -> list (auth, paginated)
/// POST   /                   -> create (admin)
/// GET    /{id}/view          -> get (auth, employee or identity id)
/// PUT    /{id}/edit          -> update (auth, own record unless admin)
/// DELETE /{id}/delete        -> delete (admin)
/// GET    /department/{id}    -> by_department (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employee::list).post(employee::create))
        .route("/{id}/view", get(employee::get))
        .route("/{id}/edit", put(employee::update))
        .route("/{id}/delete", delete(employee::delete))
        .route("/department/{id}", get(employee::by_department))
}
