//! Leave filing and the pending -> approved/rejected transition.

use ems_core::department::non_blank;
use ems_core::leave::{
    validate_date_range, validate_decision, validate_leave_type, validate_reason,
    validate_transition,
};
use ems_core::pagination::{Page, PageRequest};
use ems_core::types::{parse_date, DbId};
use ems_db::models::leave::{CreateLeave, Leave, LeaveDetail, LeaveFiling};
use ems_db::repositories::{EmployeeRepo, LeaveRepo};
use ems_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::employee;

/// Request body for `POST /leaves/add`. Dates are `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileLeaveInput {
    pub leave_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

/// Request body for `PUT /leaves/{id}/update-status`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusInput {
    pub status: Option<String>,
}

/// File a leave for the employee linked to `user_id`.
pub async fn file(pool: &DbPool, user_id: DbId, input: FileLeaveInput) -> AppResult<Leave> {
    let employee = employee::for_identity(pool, user_id).await?;

    let (Some(leave_type), Some(start), Some(end), Some(description)) = (
        non_blank(input.leave_type.as_deref()),
        non_blank(input.start_date.as_deref()),
        non_blank(input.end_date.as_deref()),
        non_blank(input.description.as_deref()),
    ) else {
        return Err(AppError::validation(
            "leave_type, start_date, end_date and description are required",
        ));
    };

    validate_leave_type(&leave_type)?;
    validate_reason(&description)?;
    let start_date = parse_date("start_date", &start)?;
    let end_date = parse_date("end_date", &end)?;
    validate_date_range(start_date, end_date)?;

    let filing = LeaveRepo::file(
        pool,
        &CreateLeave {
            employee_id: employee.id,
            leave_type,
            start_date,
            end_date,
            description,
        },
    )
    .await;

    match filing {
        Ok(LeaveFiling::Filed(leave)) => {
            tracing::info!(leave_id = leave.id, employee_id = employee.id, "Leave filed");
            Ok(leave)
        }
        Ok(LeaveFiling::Overlaps { existing_id }) => {
            tracing::debug!(employee_id = employee.id, existing_id, "Overlapping leave rejected");
            Err(AppError::conflict(
                "Leave dates overlap an existing leave request",
            ))
        }
        // The employee was removed between lookup and lock.
        Err(sqlx::Error::RowNotFound) => Err(AppError::not_found("Employee", employee.id)),
        Err(e) => Err(e.into()),
    }
}

/// Leaves of the employee addressed by identity id, falling back to
/// employee id.
pub async fn list_for_employee(pool: &DbPool, id: DbId) -> AppResult<Vec<LeaveDetail>> {
    let employee = match EmployeeRepo::find_by_user_id(pool, id).await? {
        Some(employee) => employee,
        None => EmployeeRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee", id))?,
    };
    Ok(LeaveRepo::list_for_employee(pool, employee.id).await?)
}

/// Leaves addressed strictly by employee id.
pub async fn list_by_employee_id(pool: &DbPool, employee_id: DbId) -> AppResult<Vec<LeaveDetail>> {
    EmployeeRepo::find_by_id(pool, employee_id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee", employee_id))?;
    Ok(LeaveRepo::list_for_employee(pool, employee_id).await?)
}

pub async fn list(
    pool: &DbPool,
    page: &PageRequest,
    search: Option<&str>,
) -> AppResult<Page<LeaveDetail>> {
    Ok(LeaveRepo::list(pool, page, search).await?)
}

pub async fn get(pool: &DbPool, id: DbId) -> AppResult<LeaveDetail> {
    LeaveRepo::find_detail(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Leave", id))
}

/// Approve or reject a pending leave.
pub async fn set_status(
    pool: &DbPool,
    approver_id: DbId,
    id: DbId,
    input: StatusInput,
) -> AppResult<Leave> {
    let status = input.status.as_deref().map(str::trim).unwrap_or_default();
    validate_decision(status)?;

    let current = LeaveRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Leave", id))?;
    validate_transition(&current.status, status)?;

    // Another approver may have decided it since the read above.
    let leave = LeaveRepo::decide(pool, id, status, approver_id)
        .await?
        .ok_or_else(|| AppError::conflict("Leave has already been decided"))?;

    tracing::info!(leave_id = id, status, approver_id, "Leave status updated");
    Ok(leave)
}
