//! Repository for the `employees` table and its paired identity.

use ems_core::pagination::{Page, PageRequest};
use ems_core::search::ilike_pattern;
use ems_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::employee::{
    CreateEmployee, Employee, EmployeeBrief, EmployeeDetail, EmployeeIdentity, EmployeeRemoval,
    EmployeeUpdate, UpdateEmployee,
};
use crate::repositories::UserRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, emp_code, department_id, dob, gender, marital_status, \
                       designation, salary, created_by, is_deleted, created_at, updated_at";

/// Columns for [`EmployeeDetail`]; expects [`DETAIL_FROM`].
const DETAIL_COLUMNS: &str = "e.id, e.user_id, e.name, e.emp_code, e.department_id, \
                              d.name AS department_name, e.dob, e.gender, e.marital_status, \
                              e.designation, e.salary, u.email, u.role, u.profile_url, \
                              e.created_at, e.updated_at";

const DETAIL_FROM: &str = "employees e \
                           JOIN departments d ON d.id = e.department_id \
                           JOIN users u ON u.id = e.user_id";

/// Active employees, optionally filtered by `$1` (an ILIKE pattern).
const LIST_FILTER: &str = "NOT e.is_deleted \
                           AND ($1::TEXT IS NULL \
                                OR e.name ILIKE $1 ESCAPE '\\' \
                                OR e.emp_code ILIKE $1 ESCAPE '\\' \
                                OR e.designation ILIKE $1 ESCAPE '\\' \
                                OR e.salary::TEXT ILIKE $1 ESCAPE '\\' \
                                OR e.gender ILIKE $1 ESCAPE '\\' \
                                OR e.marital_status ILIKE $1 ESCAPE '\\')";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Create an employee together with its identity in one transaction.
    ///
    /// Either both records exist afterwards or neither does. The department
    /// row is share-locked first, so a concurrent department delete either
    /// sees the new employee or wins and leaves nothing behind. Returns
    /// `None` if the department is no longer active. Unique violations on
    /// email, employee code or identity linkage propagate as database
    /// errors for the caller to classify.
    pub async fn create_with_identity(
        pool: &PgPool,
        identity: &EmployeeIdentity,
        input: &CreateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !lock_active_department(&mut tx, input.department_id).await? {
            return Ok(None);
        }

        let user_id = match identity {
            EmployeeIdentity::Create(new_user) => UserRepo::create(&mut *tx, new_user).await?.id,
            EmployeeIdentity::Adopt {
                user_id,
                name,
                role,
            } => {
                UserRepo::update_profile(
                    &mut *tx,
                    *user_id,
                    Some(name.as_str()),
                    Some(role.as_str()),
                )
                .await?
                .ok_or(sqlx::Error::RowNotFound)?
                .id
            }
        };

        let query = format!(
            "INSERT INTO employees
                (user_id, name, emp_code, department_id, dob, gender, marital_status,
                 designation, salary, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        let employee = sqlx::query_as::<_, Employee>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.emp_code)
            .bind(input.department_id)
            .bind(input.dob)
            .bind(&input.gender)
            .bind(&input.marital_status)
            .bind(&input.designation)
            .bind(input.salary)
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(employee))
    }

    /// Find an active employee by its own ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1 AND NOT is_deleted");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the active employee linked to an identity.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM employees WHERE user_id = $1 AND NOT is_deleted");
        sqlx::query_as::<_, Employee>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether any employee row (active or not) references this identity.
    pub async fn exists_for_user(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM employees WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(exists.0)
    }

    /// Find an active employee by its own ID, with projections.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EmployeeDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM} WHERE e.id = $1 AND NOT e.is_deleted"
        );
        sqlx::query_as::<_, EmployeeDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the active employee linked to an identity, with projections.
    pub async fn find_detail_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<EmployeeDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM} WHERE e.user_id = $1 AND NOT e.is_deleted"
        );
        sqlx::query_as::<_, EmployeeDetail>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List active employees, newest first, with optional free-text search.
    pub async fn list(
        pool: &PgPool,
        page: &PageRequest,
        search: Option<&str>,
    ) -> Result<Page<EmployeeDetail>, sqlx::Error> {
        let pattern = search.map(ilike_pattern);

        let count_query = format!("SELECT COUNT(*) FROM employees e WHERE {LIST_FILTER}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM}
             WHERE {LIST_FILTER}
             ORDER BY e.created_at DESC, e.id DESC
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, EmployeeDetail>(&query)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, page, total.0))
    }

    /// Active members of a department, ordered by name.
    pub async fn list_by_department(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<EmployeeBrief>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeBrief>(
            "SELECT id, name, emp_code FROM employees
             WHERE department_id = $1 AND NOT is_deleted
             ORDER BY name ASC, id ASC",
        )
        .bind(department_id)
        .fetch_all(pool)
        .await
    }

    /// Update an employee and its paired identity in one transaction.
    ///
    /// `input.name` is applied to both records; `input.role` only to the
    /// identity. A department move locks both departments in id order: the
    /// target must still be active, and the source is soft-deleted with
    /// `updated_by = actor_id` once its last active member has left.
    pub async fn update_with_identity(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmployee,
        actor_id: DbId,
    ) -> Result<EmployeeUpdate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<(DbId,)> = sqlx::query_as(
            "SELECT department_id FROM employees WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((source,)) = current else {
            return Ok(EmployeeUpdate::NotFound);
        };

        let target = input.department_id.filter(|target| *target != source);
        if let Some(target) = target {
            let mut order = [source, target];
            order.sort_unstable();
            for department_id in order {
                if department_id == target {
                    if !lock_active_department(&mut tx, target).await? {
                        return Ok(EmployeeUpdate::DepartmentInactive);
                    }
                } else {
                    sqlx::query("SELECT id FROM departments WHERE id = $1 FOR UPDATE")
                        .bind(department_id)
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }

        // `department_id = $10` fails the update if a concurrent move or
        // removal got there first.
        let query = format!(
            "UPDATE employees SET
                name = COALESCE($2, name),
                emp_code = COALESCE($3, emp_code),
                department_id = COALESCE($4, department_id),
                dob = COALESCE($5, dob),
                gender = COALESCE($6, gender),
                marital_status = COALESCE($7, marital_status),
                designation = COALESCE($8, designation),
                salary = COALESCE($9, salary)
             WHERE id = $1 AND NOT is_deleted AND department_id = $10
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.emp_code)
            .bind(target)
            .bind(input.dob)
            .bind(&input.gender)
            .bind(&input.marital_status)
            .bind(&input.designation)
            .bind(input.salary)
            .bind(source)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(employee) = updated else {
            return Ok(EmployeeUpdate::NotFound);
        };

        if input.name.is_some() || input.role.is_some() {
            UserRepo::update_profile(
                &mut *tx,
                employee.user_id,
                input.name.as_deref(),
                input.role.as_deref(),
            )
            .await?;
        }

        let department_retired = match target {
            Some(_) => retire_if_empty(&mut tx, source, actor_id).await?,
            None => false,
        };

        tx.commit().await?;
        Ok(EmployeeUpdate::Updated {
            employee,
            department_retired,
        })
    }

    /// Remove an employee with its leaves and salaries, then its identity
    /// (sessions follow through `ON DELETE CASCADE`).
    ///
    /// The department row is locked first so that concurrent removals of
    /// its last members agree on whether it became empty. If no active
    /// employees remain, the department is soft-deleted with
    /// `updated_by = actor_id`. Returns `None` if the employee is absent.
    pub async fn remove_with_identity(
        pool: &PgPool,
        id: DbId,
        actor_id: DbId,
    ) -> Result<Option<EmployeeRemoval>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let target: Option<(DbId, DbId)> = sqlx::query_as(
            "SELECT user_id, department_id FROM employees WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((user_id, department_id)) = target else {
            return Ok(None);
        };

        sqlx::query("SELECT id FROM departments WHERE id = $1 FOR UPDATE")
            .bind(department_id)
            .execute(&mut *tx)
            .await?;

        let leaves = sqlx::query("DELETE FROM leaves WHERE employee_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let salaries = sqlx::query("DELETE FROM salaries WHERE employee_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            // Lost a race with another removal.
            return Ok(None);
        }

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let department_retired = retire_if_empty(&mut tx, department_id, actor_id).await?;

        tx.commit().await?;

        Ok(Some(EmployeeRemoval {
            employee_id: id,
            user_id,
            leaves_removed: leaves.rows_affected(),
            salaries_removed: salaries.rows_affected(),
            department_retired,
        }))
    }
}

/// Share-lock an active department for the rest of the transaction.
///
/// `false` if the department is missing or soft-deleted, including when a
/// concurrent cascade committed while this call waited on the lock.
async fn lock_active_department(
    tx: &mut Transaction<'_, Postgres>,
    department_id: DbId,
) -> Result<bool, sqlx::Error> {
    let row: Option<(DbId,)> =
        sqlx::query_as("SELECT id FROM departments WHERE id = $1 AND NOT is_deleted FOR SHARE")
            .bind(department_id)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(row.is_some())
}

/// Soft-delete `department_id` if it has no active employees left.
///
/// The caller must already hold the department's row lock.
async fn retire_if_empty(
    tx: &mut Transaction<'_, Postgres>,
    department_id: DbId,
    actor_id: DbId,
) -> Result<bool, sqlx::Error> {
    let remaining: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM employees WHERE department_id = $1 AND NOT is_deleted",
    )
    .bind(department_id)
    .fetch_one(&mut **tx)
    .await?;
    if remaining.0 > 0 {
        return Ok(false);
    }

    let retired = sqlx::query(
        "UPDATE departments SET is_deleted = true, updated_by = $2
         WHERE id = $1 AND NOT is_deleted",
    )
    .bind(department_id)
    .bind(actor_id)
    .execute(&mut **tx)
    .await?;
    Ok(retired.rows_affected() > 0)
}
