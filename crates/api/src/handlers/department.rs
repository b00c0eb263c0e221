//! Handlers for the `/departments` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use ems_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{ApiResponse, PagedResponse};
use crate::services::department::{self, DepartmentInput};
use crate::state::AppState;

/// GET /api/v1/departments
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page_request(&state.config.pagination);
    let search = params.search_term();
    let departments = department::list(&state.pool, &page, search.as_deref()).await?;
    Ok(PagedResponse::ok("Departments fetched", departments))
}

/// POST /api/v1/departments
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<DepartmentInput>,
) -> AppResult<impl IntoResponse> {
    let created = department::create(&state.pool, admin.user_id, input).await?;
    Ok(ApiResponse::created("Department created", created))
}

/// GET /api/v1/departments/dep-name
pub async fn names(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let names = department::list_names(&state.pool).await?;
    Ok(ApiResponse::ok("Department names fetched", names))
}

/// GET /api/v1/departments/{id}/view
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = department::get(&state.pool, id).await?;
    Ok(ApiResponse::ok("Department fetched", found))
}

/// PUT /api/v1/departments/{id}/edit
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<DepartmentInput>,
) -> AppResult<impl IntoResponse> {
    let updated = department::update(&state.pool, admin.user_id, id, input).await?;
    Ok(ApiResponse::ok("Department updated", updated))
}

/// DELETE /api/v1/departments/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let report = department::soft_delete(&state.pool, admin.user_id, id).await?;
    Ok(ApiResponse::ok("Department deleted", report))
}
