//! Employee rules: identity pairing, dual-key lookup, and removal.

use ems_core::department::non_blank;
use ems_core::employee::{
    generate_employee_code, validate_designation, validate_gender, validate_marital_status,
    validate_salary,
};
use ems_core::identity::{normalize_email, validate_email, validate_name, validate_password};
use ems_core::pagination::{Page, PageRequest};
use ems_core::roles::{validate_role, ROLE_EMPLOYEE};
use ems_core::types::{parse_date, Date, DbId};
use ems_db::models::department::Department;
use ems_db::models::employee::{
    CreateEmployee, Employee, EmployeeBrief, EmployeeDetail, EmployeeIdentity, EmployeeRemoval,
    EmployeeUpdate, UpdateEmployee,
};
use ems_db::models::user::CreateUser;
use ems_db::repositories::{DepartmentRepo, EmployeeRepo, UserRepo};
use ems_db::DbPool;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /employees`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateEmployeeInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    /// Department name, matched exactly against active departments.
    pub department: String,
    /// `YYYY-MM-DD`.
    pub dob: Option<String>,
    pub gender: String,
    pub marital_status: String,
    pub designation: String,
    pub salary: Option<f64>,
    pub profile_url: Option<String>,
    pub profile_storage_id: Option<String>,
}

/// Request body for `PUT /employees/{id}/edit`. Blank values are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub role: Option<String>,
    /// Department name.
    pub department: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Create an employee and its identity.
///
/// An email that belongs to a registered identity without an employee record
/// is adopted: the identity is linked and renamed, and its credentials are
/// kept. Its role changes only when one is supplied.
pub async fn create(
    pool: &DbPool,
    actor_id: DbId,
    input: CreateEmployeeInput,
) -> AppResult<EmployeeDetail> {
    let name = input.name.trim().to_string();
    validate_name("Name", &name)?;
    let email = normalize_email(&input.email);
    validate_email(&email)?;
    validate_password(&input.password)?;
    let requested_role = non_blank(input.role.as_deref());
    if let Some(role) = &requested_role {
        validate_role(role)?;
    }
    let gender = input.gender.trim().to_string();
    validate_gender(&gender)?;
    let marital_status = input.marital_status.trim().to_string();
    validate_marital_status(&marital_status)?;
    let designation = input.designation.trim().to_string();
    validate_designation(&designation)?;
    let salary = input.salary.unwrap_or(0.0);
    validate_salary(salary)?;
    let dob = optional_date("dob", input.dob.as_deref())?;
    let department = department_by_name(pool, &input.department).await?;

    let identity = match UserRepo::find_by_email(pool, &email).await? {
        Some(user) if user.is_deleted => {
            return Err(AppError::conflict("Email belongs to a removed account"));
        }
        Some(user) => {
            if EmployeeRepo::exists_for_user(pool, user.id).await? {
                return Err(AppError::conflict(
                    "An employee with this email already exists",
                ));
            }
            EmployeeIdentity::Adopt {
                user_id: user.id,
                name: name.clone(),
                role: requested_role.unwrap_or(user.role),
            }
        }
        None => {
            let password_hash = hash_password(&input.password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
            EmployeeIdentity::Create(CreateUser {
                name: name.clone(),
                email,
                password_hash,
                role: requested_role.unwrap_or_else(|| ROLE_EMPLOYEE.to_string()),
                profile_url: non_blank(input.profile_url.as_deref()),
                profile_storage_id: non_blank(input.profile_storage_id.as_deref()),
            })
        }
    };

    let created = EmployeeRepo::create_with_identity(
        pool,
        &identity,
        &CreateEmployee {
            emp_code: generate_employee_code(&name),
            name,
            department_id: department.id,
            dob,
            gender,
            marital_status,
            designation,
            salary,
            created_by: actor_id,
        },
    )
    .await?;
    let employee = created.ok_or_else(|| missing_department(&department.name))?;

    tracing::info!(
        employee_id = employee.id,
        user_id = employee.user_id,
        adopted = matches!(identity, EmployeeIdentity::Adopt { .. }),
        actor_id,
        "Employee created"
    );
    detail(pool, employee.id).await
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub async fn find_by_employee_id(pool: &DbPool, id: DbId) -> AppResult<Option<EmployeeDetail>> {
    Ok(EmployeeRepo::find_detail_by_id(pool, id).await?)
}

pub async fn find_by_identity_id(
    pool: &DbPool,
    user_id: DbId,
) -> AppResult<Option<EmployeeDetail>> {
    Ok(EmployeeRepo::find_detail_by_user_id(pool, user_id).await?)
}

/// Resolve `id` as an employee id first, then as an identity id.
pub async fn get(pool: &DbPool, id: DbId) -> AppResult<EmployeeDetail> {
    if let Some(employee) = find_by_employee_id(pool, id).await? {
        return Ok(employee);
    }
    find_by_identity_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee", id))
}

/// Row-level variant of [`get`] for services that only need the employee.
pub async fn resolve(pool: &DbPool, id: DbId) -> AppResult<Employee> {
    if let Some(employee) = EmployeeRepo::find_by_id(pool, id).await? {
        return Ok(employee);
    }
    EmployeeRepo::find_by_user_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee", id))
}

/// The employee linked to an identity; no fallback.
pub async fn for_identity(pool: &DbPool, user_id: DbId) -> AppResult<Employee> {
    EmployeeRepo::find_by_user_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee", user_id))
}

pub async fn list(
    pool: &DbPool,
    page: &PageRequest,
    search: Option<&str>,
) -> AppResult<Page<EmployeeDetail>> {
    Ok(EmployeeRepo::list(pool, page, search).await?)
}

/// Active members of an active department.
pub async fn list_by_department(
    pool: &DbPool,
    department_id: DbId,
) -> AppResult<Vec<EmployeeBrief>> {
    DepartmentRepo::find_by_id(pool, department_id)
        .await?
        .ok_or_else(|| AppError::not_found("Department", department_id))?;
    Ok(EmployeeRepo::list_by_department(pool, department_id).await?)
}

// ---------------------------------------------------------------------------
// Update / remove
// ---------------------------------------------------------------------------

/// Update an employee and mirror name/role onto its identity.
///
/// Moving the last employee out of a department soft-deletes it, as
/// [`remove`] does. Non-admins may edit only their own record and may not touch role,
/// salary, designation or department. The employee code is regenerated
/// only when the name actually changes.
pub async fn update(
    pool: &DbPool,
    actor: &AuthUser,
    id: DbId,
    input: UpdateEmployeeInput,
) -> AppResult<EmployeeDetail> {
    let existing = EmployeeRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee", id))?;

    let role = non_blank(input.role.as_deref());
    let department = non_blank(input.department.as_deref());
    let designation = non_blank(input.designation.as_deref());

    if !actor.is_admin() {
        if existing.user_id != actor.user_id {
            return Err(AppError::forbidden("You may only update your own record"));
        }
        if role.is_some() || department.is_some() || designation.is_some() || input.salary.is_some()
        {
            return Err(AppError::forbidden(
                "Only an admin may change role, salary, designation or department",
            ));
        }
    }

    let name = non_blank(input.name.as_deref()).filter(|n| *n != existing.name);
    if let Some(name) = &name {
        validate_name("Name", name)?;
    }
    if let Some(role) = &role {
        validate_role(role)?;
    }
    if let Some(designation) = &designation {
        validate_designation(designation)?;
    }
    let gender = non_blank(input.gender.as_deref());
    if let Some(gender) = &gender {
        validate_gender(gender)?;
    }
    let marital_status = non_blank(input.marital_status.as_deref());
    if let Some(marital_status) = &marital_status {
        validate_marital_status(marital_status)?;
    }
    if let Some(salary) = input.salary {
        validate_salary(salary)?;
    }
    let dob = optional_date("dob", input.dob.as_deref())?;
    let department = match &department {
        Some(department) => Some(department_by_name(pool, department).await?),
        None => None,
    };

    let changes = UpdateEmployee {
        emp_code: name.as_deref().map(generate_employee_code),
        name,
        department_id: department.as_ref().map(|d| d.id),
        dob,
        gender,
        marital_status,
        designation,
        salary: input.salary,
        role,
    };
    let department_retired =
        match EmployeeRepo::update_with_identity(pool, id, &changes, actor.user_id).await? {
            EmployeeUpdate::Updated {
                department_retired, ..
            } => department_retired,
            EmployeeUpdate::NotFound => return Err(AppError::not_found("Employee", id)),
            EmployeeUpdate::DepartmentInactive => {
                let name = department.as_ref().map_or("", |d| d.name.as_str());
                return Err(missing_department(name));
            }
        };

    tracing::info!(
        employee_id = id,
        actor_id = actor.user_id,
        department_retired,
        "Employee updated"
    );
    detail(pool, id).await
}

/// Remove an employee with its leaves, salaries and identity.
///
/// A department left without active employees is soft-deleted as well.
pub async fn remove(pool: &DbPool, actor_id: DbId, id: DbId) -> AppResult<EmployeeRemoval> {
    let removal = EmployeeRepo::remove_with_identity(pool, id, actor_id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee", id))?;

    tracing::info!(
        employee_id = id,
        user_id = removal.user_id,
        department_retired = removal.department_retired,
        actor_id,
        "Employee removed"
    );
    Ok(removal)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn detail(pool: &DbPool, id: DbId) -> AppResult<EmployeeDetail> {
    find_by_employee_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee", id))
}

async fn department_by_name(pool: &DbPool, name: &str) -> AppResult<Department> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Department is required"));
    }
    DepartmentRepo::find_active_by_name(pool, name)
        .await?
        .ok_or_else(|| missing_department(name))
}

fn missing_department(name: &str) -> AppError {
    AppError::validation(format!("Department '{name}' does not exist"))
}

fn optional_date(field: &str, value: Option<&str>) -> AppResult<Option<Date>> {
    match non_blank(value) {
        Some(value) => Ok(Some(parse_date(field, &value)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use ems_core::error::CoreError;

    use super::*;

    #[test]
    fn optional_date_ignores_blank_and_rejects_garbage() {
        assert_eq!(optional_date("dob", None).unwrap(), None);
        assert_eq!(optional_date("dob", Some("  ")).unwrap(), None);
        assert_eq!(
            optional_date("dob", Some("1990-05-01")).unwrap(),
            Date::from_ymd_opt(1990, 5, 1)
        );
        assert_matches!(
            optional_date("dob", Some("05/01/1990")),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}
