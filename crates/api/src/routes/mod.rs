pub mod auth;
pub mod dashboard;
pub mod department;
pub mod employee;
pub mod health;
pub mod leave;
pub mod salary;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::middleware::rate_limit::api_rate_limit;
use crate::state::AppState;

/// Build the `/api/v1` route tree. Every route shares the global per-IP
/// budget (100 requests per 15 minutes).
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public, rate-limited)
/// /auth/login                            login (public, rate-limited)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout
/// /auth/profile                          own identity
/// /auth/{id}/change-password             change password
///
/// /departments                           list (public), create (admin)
/// /departments/dep-name                  id + name pairs (public)
/// /departments/{id}/view|edit|delete     admin
///
/// /employees                             list, create (admin)
/// /employees/{id}/view|edit              auth
/// /employees/{id}/delete                 admin
/// /employees/department/{id}             members of a department
///
/// /leaves                                list (admin)
/// /leaves/add                            file a leave
/// /leaves/{id}/view|update-status        admin
/// /leaves/{id}/employee                  leaves of one employee
/// /leaves/{id}/leaves                    leaves by employee id (admin)
///
/// /salary                                list
/// /salary/add                            add entry
/// /salary/{emp_id}/history               entries of one employee
///
/// /dashboard/summary                     organization totals (admin)
/// /dashboard/{id}/summary                one employee's leave counts
/// ```
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router(state.clone()))
        .nest("/departments", department::router())
        .nest("/employees", employee::router())
        .nest("/leaves", leave::router())
        .nest("/salary", salary::router())
        .nest("/dashboard", dashboard::router())
        .layer(from_fn_with_state(state, api_rate_limit))
}
