//! Handlers for the `/employees` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use ems_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{ApiResponse, PagedResponse};
use crate::services::employee::{self, CreateEmployeeInput, UpdateEmployeeInput};
use crate::state::AppState;

/// GET /api/v1/employees
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page_request(&state.config.pagination);
    let search = params.search_term();
    let employees = employee::list(&state.pool, &page, search.as_deref()).await?;
    Ok(PagedResponse::ok("Employees fetched", employees))
}

/// POST /api/v1/employees
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateEmployeeInput>,
) -> AppResult<impl IntoResponse> {
    let created = employee::create(&state.pool, admin.user_id, input).await?;
    Ok(ApiResponse::created("Employee created", created))
}

/// GET /api/v1/employees/{id}/view
///
/// `id` may be an employee id or the id of the paired identity.
pub async fn get(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = employee::get(&state.pool, id).await?;
    Ok(ApiResponse::ok("Employee fetched", found))
}

/// PUT /api/v1/employees/{id}/edit
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateEmployeeInput>,
) -> AppResult<impl IntoResponse> {
    let updated = employee::update(&state.pool, &user, id, input).await?;
    Ok(ApiResponse::ok("Employee updated", updated))
}

/// DELETE /api/v1/employees/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let removal = employee::remove(&state.pool, admin.user_id, id).await?;
    Ok(ApiResponse::ok("Employee deleted", removal))
}

/// GET /api/v1/employees/department/{id}
pub async fn by_department(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let members = employee::list_by_department(&state.pool, id).await?;
    Ok(ApiResponse::ok("Department employees fetched", members))
}
