//! Route definitions for the `/departments` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::department;
use crate::state::AppState;

/// Routes mounted at `/departments`.
///
/// ```text
/// GET    /               -> list (public, paginated)
/// POST   /               -> create (admin)
/// GET    /dep-name       -> names (public)
/// GET    /{id}/view      -> get (admin)
/// PUT    /{id}/edit      -> update (admin)
/// DELETE /{id}/delete    -> delete (admin, cascades)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(department::list).post(department::create))
        .route("/dep-name", get(department::names))
        .route("/{id}/view", get(department::get))
        .route("/{id}/edit", put(department::update))
        .route("/{id}/delete", delete(department::delete))
}
