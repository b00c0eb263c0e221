//! Aggregate rows for the dashboard.

use serde::Serialize;
use sqlx::FromRow;

/// Organization-wide totals over active records.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize)]
pub struct OrgTotals {
    pub total_employees: i64,
    pub total_departments: i64,
    /// Sum of the advisory `employees.salary` field.
    pub total_salary: f64,
    /// Sum of `salaries.net_salary` across the ledger.
    pub total_net_paid: f64,
}

/// One `(status, count)` row from a `GROUP BY status` over leaves.
#[derive(Debug, Clone, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
