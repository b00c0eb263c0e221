//! Leave request model, joined projection, and DTOs.

use ems_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A leave row from the `leaves` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Leave {
    pub id: DbId,
    pub employee_id: DbId,
    pub leave_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub description: String,
    pub status: String,
    pub approved_by: Option<DbId>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A leave with the filing employee, identity, and department resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaveDetail {
    pub id: DbId,
    pub employee_id: DbId,
    pub employee_name: String,
    pub emp_code: String,
    pub designation: String,
    pub department_id: DbId,
    pub department_name: String,
    pub email: String,
    pub profile_url: Option<String>,
    pub leave_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub description: String,
    pub status: String,
    pub approved_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a leave. Fields must already be validated.
#[derive(Debug, Clone)]
pub struct CreateLeave {
    pub employee_id: DbId,
    pub leave_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub description: String,
}

/// Result of an attempt to file a leave.
#[derive(Debug, Clone)]
pub enum LeaveFiling {
    Filed(Leave),
    /// An active leave of the same employee intersects the requested range.
    Overlaps { existing_id: DbId },
}
