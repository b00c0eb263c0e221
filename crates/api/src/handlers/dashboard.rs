//! Handlers for the `/dashboard` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use ems_core::types::DbId;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::services::summary;
use crate::state::AppState;

/// GET /api/v1/dashboard/summary
pub async fn overview(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let overview = summary::overview(&state.pool).await?;
    Ok(ApiResponse::ok("Dashboard summary fetched", overview))
}

/// GET /api/v1/dashboard/{id}/summary
///
/// `id` is the identity id of the employee.
pub async fn employee_summary(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let overview = summary::for_employee(&state.pool, id).await?;
    Ok(ApiResponse::ok("Employee summary fetched", overview))
}
