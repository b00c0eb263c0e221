//! Repository for the `leaves` table.

use ems_core::leave::STATUS_PENDING;
use ems_core::pagination::{Page, PageRequest};
use ems_core::search::ilike_pattern;
use ems_core::types::DbId;
use sqlx::PgPool;

use crate::models::leave::{CreateLeave, Leave, LeaveDetail, LeaveFiling};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, employee_id, leave_type, start_date, end_date, description, status, \
                       approved_by, is_deleted, created_at, updated_at";

/// Columns for [`LeaveDetail`]; expects [`DETAIL_FROM`].
const DETAIL_COLUMNS: &str = "l.id, l.employee_id, e.name AS employee_name, e.emp_code, \
                              e.designation, e.department_id, d.name AS department_name, \
                              u.email, u.profile_url, l.leave_type, l.start_date, l.end_date, \
                              l.description, l.status, l.approved_by, l.created_at, l.updated_at";

const DETAIL_FROM: &str = "leaves l \
                           JOIN employees e ON e.id = l.employee_id \
                           JOIN departments d ON d.id = e.department_id \
                           JOIN users u ON u.id = e.user_id";

/// Active leaves, optionally filtered by `$1` (an ILIKE pattern).
const LIST_FILTER: &str = "NOT l.is_deleted \
                           AND ($1::TEXT IS NULL \
                                OR l.leave_type ILIKE $1 ESCAPE '\\' \
                                OR l.description ILIKE $1 ESCAPE '\\')";

/// Provides CRUD operations for leaves.
pub struct LeaveRepo;

impl LeaveRepo {
    /// File a leave unless it intersects one of the employee's active leaves.
    ///
    /// The employee row is locked for the duration of the transaction so
    /// concurrent filings for the same employee serialize on the overlap
    /// check. Ranges are inclusive on both ends.
    pub async fn file(pool: &PgPool, input: &CreateLeave) -> Result<LeaveFiling, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query_as::<_, (DbId,)>(
            "SELECT id FROM employees WHERE id = $1 AND NOT is_deleted FOR UPDATE",
        )
        .bind(input.employee_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

        let overlapping: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM leaves
             WHERE employee_id = $1
               AND NOT is_deleted
               AND start_date <= $3
               AND end_date >= $2
             ORDER BY start_date
             LIMIT 1",
        )
        .bind(input.employee_id)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some((existing_id,)) = overlapping {
            return Ok(LeaveFiling::Overlaps { existing_id });
        }

        let query = format!(
            "INSERT INTO leaves (employee_id, leave_type, start_date, end_date, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let leave = sqlx::query_as::<_, Leave>(&query)
            .bind(input.employee_id)
            .bind(&input.leave_type)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(LeaveFiling::Filed(leave))
    }

    /// Find an active leave by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Leave>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leaves WHERE id = $1 AND NOT is_deleted");
        sqlx::query_as::<_, Leave>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active leave with projections.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<LeaveDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM} WHERE l.id = $1 AND NOT l.is_deleted"
        );
        sqlx::query_as::<_, LeaveDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All active leaves of one employee, newest first.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<LeaveDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM}
             WHERE l.employee_id = $1 AND NOT l.is_deleted
             ORDER BY l.created_at DESC, l.id DESC"
        );
        sqlx::query_as::<_, LeaveDetail>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// List active leaves, newest first, searching type and description.
    pub async fn list(
        pool: &PgPool,
        page: &PageRequest,
        search: Option<&str>,
    ) -> Result<Page<LeaveDetail>, sqlx::Error> {
        let pattern = search.map(ilike_pattern);

        let count_query = format!("SELECT COUNT(*) FROM leaves l WHERE {LIST_FILTER}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM}
             WHERE {LIST_FILTER}
             ORDER BY l.created_at DESC, l.id DESC
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, LeaveDetail>(&query)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, page, total.0))
    }

    /// Move a pending leave to `status`, stamping the approver.
    ///
    /// The `status = 'pending'` guard makes the transition race-safe:
    /// returns `None` when the leave is absent, deleted, or already decided.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        status: &str,
        approver_id: DbId,
    ) -> Result<Option<Leave>, sqlx::Error> {
        let query = format!(
            "UPDATE leaves SET status = $2, approved_by = $3
             WHERE id = $1 AND NOT is_deleted AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Leave>(&query)
            .bind(id)
            .bind(status)
            .bind(approver_id)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }
}
