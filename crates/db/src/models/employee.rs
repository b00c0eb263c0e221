//! Employee entity model, joined projections, and DTOs.

use ems_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::CreateUser;

/// An employee row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub emp_code: String,
    pub department_id: DbId,
    pub dob: Option<Date>,
    pub gender: String,
    pub marital_status: String,
    pub designation: String,
    pub salary: f64,
    pub created_by: DbId,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An employee with its department name and identity fields resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployeeDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub emp_code: String,
    pub department_id: DbId,
    pub department_name: String,
    pub dob: Option<Date>,
    pub gender: String,
    pub marital_status: String,
    pub designation: String,
    pub salary: f64,
    pub email: String,
    pub role: String,
    pub profile_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// `{id, name, emp_code}` used when listing a department's members.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployeeBrief {
    pub id: DbId,
    pub name: String,
    pub emp_code: String,
}

/// How the identity half of a new employee is obtained.
#[derive(Debug, Clone)]
pub enum EmployeeIdentity {
    /// Insert a fresh identity.
    Create(CreateUser),
    /// Link an existing identity that has no employee record yet.
    /// Its name and role are overwritten; credentials are kept.
    Adopt {
        user_id: DbId,
        name: String,
        role: String,
    },
}

/// DTO for the employee half of a create. Fields must already be validated.
#[derive(Debug, Clone)]
pub struct CreateEmployee {
    pub name: String,
    pub emp_code: String,
    pub department_id: DbId,
    pub dob: Option<Date>,
    pub gender: String,
    pub marital_status: String,
    pub designation: String,
    pub salary: f64,
    pub created_by: DbId,
}

/// DTO for updating an employee. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub emp_code: Option<String>,
    pub department_id: Option<DbId>,
    pub dob: Option<Date>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
    /// Applied to the paired identity.
    pub role: Option<String>,
}

/// Outcome of [`EmployeeRepo::update_with_identity`](crate::repositories::EmployeeRepo::update_with_identity).
#[derive(Debug, Clone)]
pub enum EmployeeUpdate {
    Updated {
        employee: Employee,
        /// The employee was the last active member of the department it left.
        department_retired: bool,
    },
    /// No active employee with that id.
    NotFound,
    /// The requested department is missing or soft-deleted.
    DepartmentInactive,
}

/// What removing an employee took with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeRemoval {
    pub employee_id: DbId,
    pub user_id: DbId,
    pub leaves_removed: u64,
    pub salaries_removed: u64,
    /// The department had no active employees left and was soft-deleted.
    pub department_retired: bool,
}
