//! Leave breakdown used by the dashboard summaries.

use serde::Serialize;

use crate::leave::{STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED};

/// Counts of leaves per status plus how many were applied for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeaveSummary {
    pub applied_for: i64,
    pub approved: i64,
    pub rejected: i64,
    pub pending: i64,
}

impl LeaveSummary {
    /// Fold `(status, count)` rows from a `GROUP BY status` query.
    ///
    /// Unknown statuses are ignored; missing ones count as zero.
    pub fn from_status_counts<S: AsRef<str>>(applied_for: i64, counts: &[(S, i64)]) -> Self {
        let mut summary = Self {
            applied_for,
            ..Self::default()
        };
        for (status, count) in counts {
            match status.as_ref() {
                STATUS_APPROVED => summary.approved += count,
                STATUS_REJECTED => summary.rejected += count,
                STATUS_PENDING => summary.pending += count,
                _ => {}
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_status_rows() {
        let rows = [("approved", 3), ("pending", 2)];
        let summary = LeaveSummary::from_status_counts(4, &rows);
        assert_eq!(
            summary,
            LeaveSummary {
                applied_for: 4,
                approved: 3,
                rejected: 0,
                pending: 2,
            }
        );
    }

    #[test]
    fn ignores_unknown_statuses() {
        let rows = [("cancelled".to_string(), 7)];
        let summary = LeaveSummary::from_status_counts(0, &rows);
        assert_eq!(summary, LeaveSummary::default());
    }
}
