//! Repository for the `user_sessions` table (refresh-token sessions).

use ems_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::session::{CreateSession, UserSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, refresh_token_hash, expires_at, is_revoked, created_at, updated_at";

/// Provides session persistence and revocation.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateSession,
    ) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(executor)
            .await
    }

    /// Find a usable session by refresh token hash: not revoked, not expired.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = $1
               AND NOT is_revoked
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke `old_session_id` and insert its replacement atomically.
    ///
    /// Returns `None` when the old session was already revoked, so a refresh
    /// token can be redeemed only once even under concurrent use.
    pub async fn rotate(
        pool: &PgPool,
        old_session_id: DbId,
        replacement: &CreateSession,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let revoked = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true WHERE id = $1 AND NOT is_revoked",
        )
        .bind(old_session_id)
        .execute(&mut *tx)
        .await?;
        if revoked.rows_affected() == 0 {
            return Ok(None);
        }

        let session = Self::create(&mut *tx, replacement).await?;
        tx.commit().await?;
        Ok(Some(session))
    }

    /// Revoke all active sessions for an identity. Returns the count revoked.
    pub async fn revoke_all_for_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE user_id = $1 AND NOT is_revoked",
        )
        .bind(user_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
