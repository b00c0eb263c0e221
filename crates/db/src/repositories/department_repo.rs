//! Repository for the `departments` table, including the cascading delete.

use ems_core::pagination::{Page, PageRequest};
use ems_core::search::ilike_pattern;
use ems_core::types::DbId;
use sqlx::PgPool;

use crate::models::department::{
    CascadeReport, CreateDepartment, Department, DepartmentName, DepartmentWithCreator,
    UpdateDepartment,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, created_by, updated_by, is_deleted, created_at, updated_at";

/// Columns for [`DepartmentWithCreator`]; expects `departments d JOIN users u`.
const JOINED_COLUMNS: &str = "d.id, d.name, d.description, d.created_by, \
                              u.name AS creator_name, u.email AS creator_email, \
                              d.updated_by, d.created_at, d.updated_at";

/// Active departments, optionally filtered by `$1` (an ILIKE pattern) on
/// name or description.
const LIST_FILTER: &str = "NOT d.is_deleted \
                           AND ($1::TEXT IS NULL \
                                OR d.name ILIKE $1 ESCAPE '\\' \
                                OR d.description ILIKE $1 ESCAPE '\\')";

/// Provides CRUD and cascade operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Insert a new department, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDepartment,
    ) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (name, description, created_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an active department by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Department>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM departments WHERE id = $1 AND NOT is_deleted");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a department by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active department with its creator resolved.
    pub async fn find_with_creator(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DepartmentWithCreator>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM departments d JOIN users u ON u.id = d.created_by
             WHERE d.id = $1 AND NOT d.is_deleted"
        );
        sqlx::query_as::<_, DepartmentWithCreator>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active department by exact (case-sensitive) name.
    pub async fn find_active_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM departments WHERE name = $1 AND NOT is_deleted");
        sqlx::query_as::<_, Department>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Whether another active department (other than `exclude_id`) uses `name`.
    pub async fn name_taken(
        pool: &PgPool,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let taken: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM departments
                WHERE name = $1 AND NOT is_deleted AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(taken.0)
    }

    /// List active departments, newest first, with optional free-text search.
    pub async fn list(
        pool: &PgPool,
        page: &PageRequest,
        search: Option<&str>,
    ) -> Result<Page<DepartmentWithCreator>, sqlx::Error> {
        let pattern = search.map(ilike_pattern);

        let count_query =
            format!("SELECT COUNT(*) FROM departments d WHERE {LIST_FILTER}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM departments d JOIN users u ON u.id = d.created_by
             WHERE {LIST_FILTER}
             ORDER BY d.created_at DESC, d.id DESC
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, DepartmentWithCreator>(&query)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, page, total.0))
    }

    /// `{id, name}` of every active department, ordered by name.
    pub async fn list_names(pool: &PgPool) -> Result<Vec<DepartmentName>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentName>(
            "SELECT id, name FROM departments WHERE NOT is_deleted ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update an active department. Only non-`None` fields are applied;
    /// `updated_by` is always stamped.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDepartment,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_by = $4
             WHERE id = $1 AND NOT is_deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.updated_by)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a department and remove everything that hangs off it.
    ///
    /// Runs in one transaction, in this order:
    ///
    /// 1. lock the department row (must be active)
    /// 2. collect its employees
    /// 3. hard-delete their leaves and salaries
    /// 4. hard-delete the employee rows
    /// 5. flag the paired identities deleted and revoke their sessions
    /// 6. flag the department deleted, stamping `updated_by`
    ///
    /// Returns `None` (and changes nothing) if the department is absent or
    /// already deleted.
    pub async fn cascade_soft_delete(
        pool: &PgPool,
        id: DbId,
        actor_id: DbId,
    ) -> Result<Option<CascadeReport>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM departments WHERE id = $1 AND NOT is_deleted FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let members: Vec<(DbId, DbId)> =
            sqlx::query_as("SELECT id, user_id FROM employees WHERE department_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;
        let employee_ids: Vec<DbId> = members.iter().map(|(emp, _)| *emp).collect();
        let user_ids: Vec<DbId> = members.iter().map(|(_, user)| *user).collect();

        let leaves = sqlx::query("DELETE FROM leaves WHERE employee_id = ANY($1)")
            .bind(&employee_ids)
            .execute(&mut *tx)
            .await?;

        let salaries = sqlx::query("DELETE FROM salaries WHERE employee_id = ANY($1)")
            .bind(&employee_ids)
            .execute(&mut *tx)
            .await?;

        let employees = sqlx::query("DELETE FROM employees WHERE department_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let identities = sqlx::query(
            "UPDATE users SET is_deleted = true WHERE id = ANY($1) AND NOT is_deleted",
        )
        .bind(&user_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE user_sessions SET is_revoked = true WHERE user_id = ANY($1)")
            .bind(&user_ids)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE departments SET is_deleted = true, updated_by = $2 WHERE id = $1")
            .bind(id)
            .bind(actor_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(CascadeReport {
            employees_removed: employees.rows_affected(),
            leaves_removed: leaves.rows_affected(),
            salaries_removed: salaries.rows_affected(),
            identities_retired: identities.rows_affected(),
        }))
    }
}
