//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ems_core::roles::ROLE_ADMIN;
use ems_core::types::DbId;
use ems_db::repositories::UserRepo;

use crate::auth::cookies::{read_cookie, ACCESS_COOKIE};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller.
///
/// The token is read from `Authorization: Bearer <token>`, falling back to
/// the `access_token` cookie. After signature and expiry checks the subject
/// is resolved to a live identity, and the role stored on that identity is
/// used rather than the one baked into the token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .or_else(|| read_cookie(&parts.headers, ACCESS_COOKIE))
            .ok_or_else(|| AppError::unauthorized("Missing access token"))?;

        let claims = validate_token(&token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        let user = UserRepo::find_active_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
        })
    }
}

/// The bearer token from the `Authorization` header, if one is present.
///
/// A header with any scheme other than `Bearer` is rejected outright rather
/// than falling through to the cookie.
fn bearer_token(parts: &Parts) -> Result<Option<String>, AppError> {
    let Some(header) = parts.headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| AppError::unauthorized("Malformed Authorization header"))?;
    let token = value.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("Invalid Authorization format. Expected: Bearer <token>")
    })?;
    Ok(Some(token.trim().to_string()))
}
