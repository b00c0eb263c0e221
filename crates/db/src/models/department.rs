//! Department entity model and DTOs.

use ems_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A department row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_by: DbId,
    pub updated_by: Option<DbId>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A department joined with its creator's name and email.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentWithCreator {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_by: DbId,
    pub creator_name: String,
    pub creator_email: String,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// `{id, name}` pair for pickers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentName {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a department. Fields must already be trimmed and validated.
#[derive(Debug, Clone)]
pub struct CreateDepartment {
    pub name: String,
    pub description: String,
    pub created_by: DbId,
}

/// DTO for updating a department. `None` fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateDepartment {
    pub name: Option<String>,
    pub description: Option<String>,
    pub updated_by: DbId,
}

/// What a cascading department delete removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub employees_removed: u64,
    pub leaves_removed: u64,
    pub salaries_removed: u64,
    pub identities_retired: u64,
}
