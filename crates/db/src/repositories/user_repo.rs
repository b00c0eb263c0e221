//! Repository for the `users` table (authenticable identities).

use ems_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, role, profile_url, \
                       profile_storage_id, is_deleted, created_at, updated_at";

/// Provides CRUD operations for identities.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new identity, returning the created row.
    ///
    /// Generic over the executor so it can run inside the employee
    /// create transaction as well as directly on the pool.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role, profile_url, profile_storage_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.profile_url)
            .bind(&input.profile_storage_id)
            .fetch_one(executor)
            .await
    }

    /// Find an identity by ID, including soft-deleted ones.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live (not soft-deleted) identity by ID.
    pub async fn find_active_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND NOT is_deleted");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an identity by email. The caller normalizes to lowercase first.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Update name and/or role. `None` fields are left unchanged.
    pub async fn update_profile<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        name: Option<&str>,
        role: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                role = COALESCE($3, role)
             WHERE id = $1 AND NOT is_deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(name)
            .bind(role)
            .fetch_optional(executor)
            .await
    }

    /// Update an identity's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2 WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
