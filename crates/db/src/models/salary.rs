//! Salary ledger model, joined projection, and DTOs.

use ems_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A salary row from the `salaries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Salary {
    pub id: DbId,
    pub employee_id: DbId,
    pub basic_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_salary: f64,
    pub pay_date: Date,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A salary entry with employee and department resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SalaryDetail {
    pub id: DbId,
    pub employee_id: DbId,
    pub employee_name: String,
    pub emp_code: String,
    pub department_id: DbId,
    pub department_name: String,
    pub basic_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_salary: f64,
    pub pay_date: Date,
    pub created_at: Timestamp,
}

/// DTO for recording a pay entry. `net_salary` is computed by the caller.
#[derive(Debug, Clone)]
pub struct CreateSalary {
    pub employee_id: DbId,
    pub basic_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_salary: f64,
    pub pay_date: Date,
}
