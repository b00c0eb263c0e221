//! Handlers for the `/auth` resource.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use ems_core::types::DbId;
use serde_json::json;

use crate::auth::cookies::{clear_cookie, read_cookie, set_cookie, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::auth::jwt::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::services::auth::{
    self, AuthSession, ChangePasswordInput, LoginInput, RefreshInput, RegisterInput,
};
use crate::state::AppState;

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterInput>,
) -> AppResult<impl IntoResponse> {
    let session = auth::register(&state.pool, &state.config.jwt, input).await?;
    let cookies = session_cookies(&state.config.jwt, &session);
    Ok((
        StatusCode::CREATED,
        cookies,
        ApiResponse::ok("Registration successful", session),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginInput>,
) -> AppResult<impl IntoResponse> {
    let session = auth::login(&state.pool, &state.config.jwt, input).await?;
    let cookies = session_cookies(&state.config.jwt, &session);
    Ok((cookies, ApiResponse::ok("Login successful", session)))
}

/// POST /api/v1/auth/refresh
///
/// The refresh token comes from the JSON body or, failing that, the
/// `refresh_token` cookie. An empty body is allowed.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: RefreshInput = if body.iter().all(u8::is_ascii_whitespace) {
        RefreshInput::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
    };
    let token = input
        .refresh_token
        .filter(|t| !t.is_empty())
        .or_else(|| read_cookie(&headers, REFRESH_COOKIE))
        .ok_or_else(|| AppError::unauthorized("Missing refresh token"))?;

    let session = auth::refresh(&state.pool, &state.config.jwt, &token).await?;
    let cookies = session_cookies(&state.config.jwt, &session);
    Ok((cookies, ApiResponse::ok("Token refreshed", session)))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let revoked = auth::logout(&state.pool, user.user_id).await?;

    let mut cookies = HeaderMap::new();
    for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
        if let Some(value) = clear_cookie(name) {
            cookies.append(SET_COOKIE, value);
        }
    }
    Ok((
        cookies,
        ApiResponse::ok("Logged out", json!({ "sessions_revoked": revoked })),
    ))
}

/// GET /api/v1/auth/profile
pub async fn profile(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let profile = auth::profile(&state.pool, user.user_id).await?;
    Ok(ApiResponse::ok("Profile fetched", profile))
}

/// PUT /api/v1/auth/{id}/change-password
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ChangePasswordInput>,
) -> AppResult<impl IntoResponse> {
    auth::change_password(&state.pool, &user, id, input).await?;
    Ok(ApiResponse::ok("Password changed", json!(null)))
}

fn session_cookies(jwt: &JwtConfig, session: &AuthSession) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let pairs = [
        (ACCESS_COOKIE, &session.access_token, jwt.access_ttl_secs()),
        (
            REFRESH_COOKIE,
            &session.refresh_token,
            jwt.refresh_token_expiry_days * 24 * 60 * 60,
        ),
    ];
    for (name, value, max_age) in pairs {
        if let Some(cookie) = set_cookie(name, value, max_age) {
            headers.append(SET_COOKIE, cookie);
        }
    }
    headers
}
