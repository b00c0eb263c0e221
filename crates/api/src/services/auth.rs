//! Registration, login, token rotation, and password changes.

use ems_core::identity::{normalize_email, validate_email, validate_name, validate_password};
use ems_core::roles::{validate_self_assigned_role, ROLE_ADMIN, ROLE_EMPLOYEE};
use ems_core::types::DbId;
use ems_db::models::session::CreateSession;
use ems_db::models::user::{CreateUser, User, UserResponse};
use ems_db::repositories::{SessionRepo, UserRepo};
use ems_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{
    generate_access_token, generate_refresh_token, hash_refresh_token, JwtConfig,
};
use crate::auth::password::{hash_password, verify_password};
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

const BAD_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub profile_url: Option<String>,
    pub profile_storage_id: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`. The cookie is used when absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefreshInput {
    pub refresh_token: Option<String>,
}

/// Request body for `PUT /auth/{id}/change-password`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangePasswordInput {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Tokens plus the identity they were issued to.
#[derive(Debug, Serialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Create an identity and sign it in.
///
/// Callers may pick `employee` (default) or `manager`; `admin` is refused.
pub async fn register(
    pool: &DbPool,
    jwt: &JwtConfig,
    input: RegisterInput,
) -> AppResult<AuthSession> {
    let name = input.name.trim();
    validate_name("Name", name)?;
    let email = normalize_email(&input.email);
    validate_email(&email)?;
    validate_password(&input.password)?;

    let role = input
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(ROLE_EMPLOYEE);
    validate_self_assigned_role(role)?;

    if UserRepo::find_by_email(pool, &email).await?.is_some() {
        return Err(AppError::conflict("Email is already registered"));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email,
            password_hash,
            role: role.to_string(),
            profile_url: input.profile_url,
            profile_storage_id: input.profile_storage_id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "Identity registered");
    issue_session(pool, jwt, &user).await
}

/// Verify credentials and issue a token pair.
///
/// Unknown email, wrong password and deleted identities all produce the
/// same 401 so the response does not reveal which emails exist.
pub async fn login(pool: &DbPool, jwt: &JwtConfig, input: LoginInput) -> AppResult<AuthSession> {
    let email = normalize_email(&input.email);
    if email.is_empty() || input.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let user = UserRepo::find_by_email(pool, &email)
        .await?
        .filter(|u| !u.is_deleted)
        .ok_or_else(|| AppError::unauthorized(BAD_CREDENTIALS))?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::unauthorized(BAD_CREDENTIALS));
    }

    tracing::info!(user_id = user.id, "Login succeeded");
    issue_session(pool, jwt, &user).await
}

/// Exchange a refresh token for a new pair. The old session is revoked.
pub async fn refresh(
    pool: &DbPool,
    jwt: &JwtConfig,
    refresh_token: &str,
) -> AppResult<AuthSession> {
    let invalid = || AppError::unauthorized("Invalid or expired refresh token");

    let session = SessionRepo::find_active_by_hash(pool, &hash_refresh_token(refresh_token))
        .await?
        .ok_or_else(invalid)?;
    let user = UserRepo::find_active_by_id(pool, session.user_id)
        .await?
        .ok_or_else(invalid)?;

    let (plaintext, digest) = generate_refresh_token();
    SessionRepo::rotate(
        pool,
        session.id,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: digest,
            expires_at: jwt.refresh_expires_at(),
        },
    )
    .await?
    .ok_or_else(invalid)?;

    build_session(jwt, &user, plaintext)
}

/// Revoke every session of the caller. Returns how many were active.
pub async fn logout(pool: &DbPool, user_id: DbId) -> AppResult<u64> {
    let revoked = SessionRepo::revoke_all_for_user(pool, user_id).await?;
    tracing::info!(user_id, revoked, "Logged out");
    Ok(revoked)
}

/// The caller's own identity.
pub async fn profile(pool: &DbPool, user_id: DbId) -> AppResult<UserResponse> {
    UserRepo::find_active_by_id(pool, user_id)
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| AppError::not_found("User", user_id))
}

/// Change the password of `target_id`.
///
/// Callers may change only their own password unless they are admin. The
/// old password must verify; afterwards every session of the identity is
/// revoked.
pub async fn change_password(
    pool: &DbPool,
    actor: &AuthUser,
    target_id: DbId,
    input: ChangePasswordInput,
) -> AppResult<()> {
    if !actor.is_admin() && actor.user_id != target_id {
        return Err(AppError::forbidden("You may only change your own password"));
    }

    let (Some(old), Some(new), Some(confirm)) = (
        input.old_password.filter(|s| !s.is_empty()),
        input.new_password.filter(|s| !s.is_empty()),
        input.confirm_password.filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::validation("All password fields are required"));
    };
    if new != confirm {
        return Err(AppError::validation(
            "New password and confirmation do not match",
        ));
    }
    validate_password(&new)?;

    let user = UserRepo::find_active_by_id(pool, target_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", target_id))?;
    let valid = verify_password(&old, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(AppError::validation("Old password is incorrect"));
    }

    let password_hash = hash_password(&new)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(pool, user.id, &password_hash).await?;
    SessionRepo::revoke_all_for_user(pool, user.id).await?;

    tracing::info!(user_id = user.id, actor_id = actor.user_id, "Password changed");
    Ok(())
}

/// Make sure the configured admin identity exists.
///
/// Returns `true` when a new identity was created. An existing identity with
/// that email is left untouched.
pub async fn ensure_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<bool> {
    let email = normalize_email(&admin.email);
    validate_email(&email)?;
    validate_name("ADMIN_NAME", admin.name.trim())?;
    validate_password(&admin.password)?;

    if let Some(existing) = UserRepo::find_by_email(pool, &email).await? {
        if existing.role != ROLE_ADMIN || existing.is_deleted {
            tracing::warn!(
                user_id = existing.id,
                role = %existing.role,
                "Bootstrap admin email belongs to a non-admin or deleted identity"
            );
        }
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: admin.name.trim().to_string(),
            email,
            password_hash,
            role: ROLE_ADMIN.to_string(),
            profile_url: None,
            profile_storage_id: None,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "Bootstrap admin created");
    Ok(true)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Persist a fresh refresh session for `user` and mint the access token.
async fn issue_session(pool: &DbPool, jwt: &JwtConfig, user: &User) -> AppResult<AuthSession> {
    let (plaintext, digest) = generate_refresh_token();
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: digest,
            expires_at: jwt.refresh_expires_at(),
        },
    )
    .await?;
    build_session(jwt, user, plaintext)
}

fn build_session(jwt: &JwtConfig, user: &User, refresh_token: String) -> AppResult<AuthSession> {
    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthSession {
        access_token,
        refresh_token,
        expires_in: jwt.access_ttl_secs(),
        user: UserInfo {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        },
    })
}
