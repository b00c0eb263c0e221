//! Route definitions for the `/auth` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::middleware::rate_limit::{login_rate_limit, register_rate_limit};
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register                -> register (10 per hour per IP)
/// POST /login                   -> login (20 per 15 minutes per IP)
/// POST /refresh                 -> refresh
/// POST /logout                  -> logout (requires auth)
/// GET  /profile                 -> profile (requires auth)
/// PUT  /{id}/change-password    -> change_password (requires auth)
/// ```
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(auth::register).layer(from_fn_with_state(state.clone(), register_rate_limit)),
        )
        .route(
            "/login",
            post(auth::login).layer(from_fn_with_state(state, login_rate_limit)),
        )
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/profile", get(auth::profile))
        .route("/{id}/change-password", put(auth::change_password))
}
