//! Department rules: unique active names and the cascading delete.

use ems_core::department::{non_blank, validate_department_name, validate_description};
use ems_core::pagination::{Page, PageRequest};
use ems_core::types::DbId;
use ems_db::models::department::{
    CascadeReport, CreateDepartment, Department, DepartmentName, DepartmentWithCreator,
    UpdateDepartment,
};
use ems_db::repositories::DepartmentRepo;
use ems_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Request body for department create and update.
///
/// On update, absent or blank fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DepartmentInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn create(pool: &DbPool, actor_id: DbId, input: DepartmentInput) -> AppResult<Department> {
    let name = non_blank(input.name.as_deref())
        .ok_or_else(|| AppError::validation("Department name is required"))?;
    validate_department_name(&name)?;
    let description = non_blank(input.description.as_deref())
        .ok_or_else(|| AppError::validation("Description is required"))?;
    validate_description(&description)?;

    if DepartmentRepo::name_taken(pool, &name, None).await? {
        return Err(AppError::conflict("Department name already exists"));
    }

    // A concurrent create that slips past the check above hits the partial
    // unique index and surfaces as 409 through the sqlx classification.
    let department = DepartmentRepo::create(
        pool,
        &CreateDepartment {
            name,
            description,
            created_by: actor_id,
        },
    )
    .await?;

    tracing::info!(department_id = department.id, actor_id, "Department created");
    Ok(department)
}

pub async fn list(
    pool: &DbPool,
    page: &PageRequest,
    search: Option<&str>,
) -> AppResult<Page<DepartmentWithCreator>> {
    Ok(DepartmentRepo::list(pool, page, search).await?)
}

pub async fn get(pool: &DbPool, id: DbId) -> AppResult<DepartmentWithCreator> {
    DepartmentRepo::find_with_creator(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Department", id))
}

pub async fn update(
    pool: &DbPool,
    actor_id: DbId,
    id: DbId,
    input: DepartmentInput,
) -> AppResult<Department> {
    let existing = DepartmentRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Department", id))?;

    let name = non_blank(input.name.as_deref()).filter(|n| *n != existing.name);
    if let Some(name) = &name {
        validate_department_name(name)?;
        if DepartmentRepo::name_taken(pool, name, Some(id)).await? {
            return Err(AppError::conflict("Department name already exists"));
        }
    }
    let description = non_blank(input.description.as_deref());
    if let Some(description) = &description {
        validate_description(description)?;
    }

    let department = DepartmentRepo::update(
        pool,
        id,
        &UpdateDepartment {
            name,
            description,
            updated_by: actor_id,
        },
    )
    .await?
    .ok_or_else(|| AppError::not_found("Department", id))?;

    tracing::info!(department_id = id, actor_id, "Department updated");
    Ok(department)
}

/// Soft-delete a department together with everything that hangs off it.
pub async fn soft_delete(pool: &DbPool, actor_id: DbId, id: DbId) -> AppResult<CascadeReport> {
    let report = DepartmentRepo::cascade_soft_delete(pool, id, actor_id)
        .await?
        .ok_or_else(|| AppError::not_found("Department", id))?;

    tracing::info!(
        department_id = id,
        actor_id,
        employees = report.employees_removed,
        leaves = report.leaves_removed,
        salaries = report.salaries_removed,
        "Department deleted"
    );
    Ok(report)
}

pub async fn list_names(pool: &DbPool) -> AppResult<Vec<DepartmentName>> {
    Ok(DepartmentRepo::list_names(pool).await?)
}
