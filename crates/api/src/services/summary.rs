//! Dashboard aggregates.

use ems_core::summary::LeaveSummary;
use ems_core::types::DbId;
use ems_db::models::summary::{OrgTotals, StatusCount};
use ems_db::repositories::SummaryRepo;
use ems_db::DbPool;
use serde::Serialize;

use crate::error::AppResult;
use crate::services::employee;

/// Organization-wide dashboard figures.
#[derive(Debug, Serialize)]
pub struct Overview {
    #[serde(flatten)]
    pub totals: OrgTotals,
    pub leave_summary: LeaveSummary,
}

/// Leave figures for a single employee.
#[derive(Debug, Serialize)]
pub struct EmployeeOverview {
    pub employee_id: DbId,
    pub leave_summary: LeaveSummary,
}

pub async fn overview(pool: &DbPool) -> AppResult<Overview> {
    let totals = SummaryRepo::org_totals(pool).await?;
    let counts = SummaryRepo::leave_status_counts(pool, None).await?;
    let applied_for = SummaryRepo::employees_with_leave(pool).await?;

    Ok(Overview {
        totals,
        leave_summary: tally(applied_for, counts),
    })
}

/// Per-employee figures, addressed by identity id.
pub async fn for_employee(pool: &DbPool, user_id: DbId) -> AppResult<EmployeeOverview> {
    let employee = employee::for_identity(pool, user_id).await?;
    let counts = SummaryRepo::leave_status_counts(pool, Some(employee.id)).await?;
    let applied_for: i64 = counts.iter().map(|c| c.count).sum();

    Ok(EmployeeOverview {
        employee_id: employee.id,
        leave_summary: tally(applied_for, counts),
    })
}

fn tally(applied_for: i64, counts: Vec<StatusCount>) -> LeaveSummary {
    let rows: Vec<(String, i64)> = counts.into_iter().map(|c| (c.status, c.count)).collect();
    LeaveSummary::from_status_counts(applied_for, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, count: i64) -> StatusCount {
        StatusCount {
            status: status.to_string(),
            count,
        }
    }

    #[test]
    fn tally_folds_grouped_rows() {
        let summary = tally(2, vec![row("approved", 3), row("pending", 1)]);
        assert_eq!(
            summary,
            LeaveSummary {
                applied_for: 2,
                approved: 3,
                rejected: 0,
                pending: 1,
            }
        );
    }
}
