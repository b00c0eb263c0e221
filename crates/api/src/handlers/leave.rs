//! Handlers for the `/leaves` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use ems_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{ApiResponse, PagedResponse};
use crate::services::leave::{self, FileLeaveInput, StatusInput};
use crate::state::AppState;

/// POST /api/v1/leaves/add
pub async fn file(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<FileLeaveInput>,
) -> AppResult<impl IntoResponse> {
    let filed = leave::file(&state.pool, user.user_id, input).await?;
    Ok(ApiResponse::created("Leave request submitted", filed))
}

/// GET /api/v1/leaves
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page_request(&state.config.pagination);
    let search = params.search_term();
    let leaves = leave::list(&state.pool, &page, search.as_deref()).await?;
    Ok(PagedResponse::ok("Leaves fetched", leaves))
}

/// GET /api/v1/leaves/{id}/view
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = leave::get(&state.pool, id).await?;
    Ok(ApiResponse::ok("Leave fetched", found))
}

/// PUT /api/v1/leaves/{id}/update-status
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<StatusInput>,
) -> AppResult<impl IntoResponse> {
    let decided = leave::set_status(&state.pool, admin.user_id, id, input).await?;
    Ok(ApiResponse::ok("Leave status updated", decided))
}

/// GET /api/v1/leaves/{id}/employee
///
/// `id` is an identity id, or an employee id when no identity matches.
pub async fn for_employee(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let leaves = leave::list_for_employee(&state.pool, id).await?;
    Ok(ApiResponse::ok("Leaves fetched", leaves))
}

/// GET /api/v1/leaves/{id}/leaves
pub async fn by_employee_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let leaves = leave::list_by_employee_id(&state.pool, id).await?;
    Ok(ApiResponse::ok("Leaves fetched", leaves))
}
