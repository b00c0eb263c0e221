//! Handlers for the `/salary` resource. Every route requires a login.

use axum::extract::State;
use axum::response::IntoResponse;
use ems_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAuth;
use crate::query::ListParams;
use crate::response::{ApiResponse, PagedResponse};
use crate::services::salary::{self, AddSalaryInput};
use crate::state::AppState;

/// GET /api/v1/salary
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page_request(&state.config.pagination);
    let search = params.search_term();
    let entries = salary::list(&state.pool, &page, search.as_deref()).await?;
    Ok(PagedResponse::ok("Salaries fetched", entries))
}

/// POST /api/v1/salary/add
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppJson(input): AppJson<AddSalaryInput>,
) -> AppResult<impl IntoResponse> {
    let entry = salary::add(&state.pool, input).await?;
    tracing::debug!(salary_id = entry.id, actor_id = user.user_id, "Salary added via API");
    Ok(ApiResponse::created("Salary added", entry))
}

/// GET /api/v1/salary/{emp_id}/history
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let entries = salary::history(&state.pool, id).await?;
    Ok(ApiResponse::ok("Salary history fetched", entries))
}
