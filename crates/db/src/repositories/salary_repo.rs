//! Repository for the `salaries` table.

use ems_core::pagination::{Page, PageRequest};
use ems_core::search::ilike_pattern;
use ems_core::types::DbId;
use sqlx::PgPool;

use crate::models::salary::{CreateSalary, Salary, SalaryDetail};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, employee_id, basic_salary, allowances, deductions, net_salary, \
                       pay_date, is_deleted, created_at, updated_at";

/// Columns for [`SalaryDetail`]; expects [`DETAIL_FROM`].
const DETAIL_COLUMNS: &str = "s.id, s.employee_id, e.name AS employee_name, e.emp_code, \
                              e.department_id, d.name AS department_name, s.basic_salary, \
                              s.allowances, s.deductions, s.net_salary, s.pay_date, s.created_at";

const DETAIL_FROM: &str = "salaries s \
                           JOIN employees e ON e.id = s.employee_id \
                           JOIN departments d ON d.id = e.department_id";

/// Active salaries, optionally restricted to employees whose name matches
/// `$1` (an ILIKE pattern).
const LIST_FILTER: &str = "NOT s.is_deleted \
                           AND ($1::TEXT IS NULL OR s.employee_id IN ( \
                                SELECT id FROM employees \
                                WHERE NOT is_deleted AND name ILIKE $1 ESCAPE '\\'))";

/// Provides CRUD operations for salary entries.
pub struct SalaryRepo;

impl SalaryRepo {
    /// Insert a pay entry, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSalary) -> Result<Salary, sqlx::Error> {
        let query = format!(
            "INSERT INTO salaries
                (employee_id, basic_salary, allowances, deductions, net_salary, pay_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Salary>(&query)
            .bind(input.employee_id)
            .bind(input.basic_salary)
            .bind(input.allowances)
            .bind(input.deductions)
            .bind(input.net_salary)
            .bind(input.pay_date)
            .fetch_one(pool)
            .await
    }

    /// List active entries by pay date descending.
    pub async fn list(
        pool: &PgPool,
        page: &PageRequest,
        employee_name: Option<&str>,
    ) -> Result<Page<SalaryDetail>, sqlx::Error> {
        let pattern = employee_name.map(ilike_pattern);

        let count_query = format!("SELECT COUNT(*) FROM salaries s WHERE {LIST_FILTER}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM}
             WHERE {LIST_FILTER}
             ORDER BY s.pay_date DESC, s.id DESC
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, SalaryDetail>(&query)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, page, total.0))
    }

    /// All active entries of one employee, pay date descending.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<SalaryDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM}
             WHERE s.employee_id = $1 AND NOT s.is_deleted
             ORDER BY s.pay_date DESC, s.id DESC"
        );
        sqlx::query_as::<_, SalaryDetail>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }
}
