//! Salary ledger entries.

use ems_core::department::non_blank;
use ems_core::pagination::{Page, PageRequest};
use ems_core::salary::SalaryAmounts;
use ems_core::types::{parse_date, DbId};
use ems_db::models::salary::{CreateSalary, Salary, SalaryDetail};
use ems_db::repositories::{EmployeeRepo, SalaryRepo};
use ems_db::DbPool;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::services::employee;

/// Request body for `POST /salary/add`.
///
/// Amounts are kept raw so numeric strings are accepted alongside numbers.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddSalaryInput {
    pub employee_id: Option<DbId>,
    pub basic_salary: Option<Value>,
    pub allowances: Option<Value>,
    pub deductions: Option<Value>,
    /// `YYYY-MM-DD`; today (UTC) when absent.
    pub pay_date: Option<String>,
}

pub async fn add(pool: &DbPool, input: AddSalaryInput) -> AppResult<Salary> {
    let employee_id = input
        .employee_id
        .ok_or_else(|| AppError::validation("employee_id is required"))?;
    let amounts = SalaryAmounts::from_raw(
        input.basic_salary.as_ref(),
        input.allowances.as_ref(),
        input.deductions.as_ref(),
    );
    amounts.validate()?;
    let net_salary = amounts.net()?;
    let pay_date = match non_blank(input.pay_date.as_deref()) {
        Some(value) => parse_date("pay_date", &value)?,
        None => chrono::Utc::now().date_naive(),
    };

    EmployeeRepo::find_by_id(pool, employee_id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee", employee_id))?;

    let salary = SalaryRepo::create(
        pool,
        &CreateSalary {
            employee_id,
            basic_salary: amounts.basic,
            allowances: amounts.allowances,
            deductions: amounts.deductions,
            net_salary,
            pay_date,
        },
    )
    .await?;

    tracing::info!(
        salary_id = salary.id,
        employee_id,
        net_salary = salary.net_salary,
        "Salary recorded"
    );
    Ok(salary)
}

/// Ledger page; `search` filters by employee name.
pub async fn list(
    pool: &DbPool,
    page: &PageRequest,
    search: Option<&str>,
) -> AppResult<Page<SalaryDetail>> {
    Ok(SalaryRepo::list(pool, page, search).await?)
}

/// Entries of the employee addressed by employee id, then identity id.
pub async fn history(pool: &DbPool, id: DbId) -> AppResult<Vec<SalaryDetail>> {
    let employee = employee::resolve(pool, id).await?;
    Ok(SalaryRepo::list_for_employee(pool, employee.id).await?)
}
