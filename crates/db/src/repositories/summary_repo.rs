//! Read-only aggregate queries for the dashboard.

use ems_core::types::DbId;
use sqlx::PgPool;

use crate::models::summary::{OrgTotals, StatusCount};

/// Aggregates over active records.
pub struct SummaryRepo;

impl SummaryRepo {
    /// Counts and salary sums across the organization.
    pub async fn org_totals(pool: &PgPool) -> Result<OrgTotals, sqlx::Error> {
        sqlx::query_as::<_, OrgTotals>(
            "SELECT
                (SELECT COUNT(*) FROM employees WHERE NOT is_deleted) AS total_employees,
                (SELECT COUNT(*) FROM departments WHERE NOT is_deleted) AS total_departments,
                (SELECT COALESCE(SUM(salary), 0)::DOUBLE PRECISION
                   FROM employees WHERE NOT is_deleted) AS total_salary,
                (SELECT COALESCE(SUM(net_salary), 0)::DOUBLE PRECISION
                   FROM salaries WHERE NOT is_deleted) AS total_net_paid",
        )
        .fetch_one(pool)
        .await
    }

    /// Active leave counts grouped by status, optionally for one employee.
    pub async fn leave_status_counts(
        pool: &PgPool,
        employee_id: Option<DbId>,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM leaves
             WHERE NOT is_deleted AND ($1::BIGINT IS NULL OR employee_id = $1)
             GROUP BY status",
        )
        .bind(employee_id)
        .fetch_all(pool)
        .await
    }

    /// Number of distinct employees with at least one active leave.
    pub async fn employees_with_leave(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(DISTINCT employee_id) FROM leaves WHERE NOT is_deleted")
                .fetch_one(pool)
                .await?;
        Ok(count.0)
    }
}
