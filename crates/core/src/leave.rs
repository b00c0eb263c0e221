//! Leave request rules: types, date ranges, overlap, and the approval
//! state machine.
//!
//! ```text
//! pending --approve--> approved
//! pending --reject---> rejected
//! ```
//!
//! Both `approved` and `rejected` are terminal.

use crate::error::CoreError;
use crate::types::Date;

pub const LEAVE_CASUAL: &str = "casual";
pub const LEAVE_SICK: &str = "sick";
pub const LEAVE_MATERNITY: &str = "maternity";

/// All valid leave types.
pub const VALID_LEAVE_TYPES: &[&str] = &[LEAVE_CASUAL, LEAVE_SICK, LEAVE_MATERNITY];

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// Statuses an admin may set through the status endpoint.
pub const VALID_DECISIONS: &[&str] = &[STATUS_APPROVED, STATUS_REJECTED];

/// Validate a leave type string.
pub fn validate_leave_type(leave_type: &str) -> Result<(), CoreError> {
    if VALID_LEAVE_TYPES.contains(&leave_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid leave type '{leave_type}'. Must be one of: {}",
            VALID_LEAVE_TYPES.join(", ")
        )))
    }
}

/// Validate a leave reason: required, non-blank.
pub fn validate_reason(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation("Description is required".into()));
    }
    Ok(())
}

/// A filed leave must end strictly after it starts.
pub fn validate_date_range(start: Date, end: Date) -> Result<(), CoreError> {
    if start >= end {
        return Err(CoreError::Validation(
            "Invalid date range: end date must be after start date".into(),
        ));
    }
    Ok(())
}

/// Inclusive interval overlap: `a.start <= b.end && a.end >= b.start`.
///
/// Adjacent ranges (one ends the day before the other starts) do not
/// overlap; ranges sharing a boundary day do.
pub fn ranges_overlap(a_start: Date, a_end: Date, b_start: Date, b_end: Date) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Validate a requested status decision.
pub fn validate_decision(status: &str) -> Result<(), CoreError> {
    if VALID_DECISIONS.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_DECISIONS.join(", ")
        )))
    }
}

/// Check that `current -> next` is an allowed transition.
///
/// Only pending leaves can be decided; anything else is a conflict with the
/// leave's current state.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    validate_decision(next)?;
    if current != STATUS_PENDING {
        return Err(CoreError::Conflict(format!(
            "Leave is already {current} and can no longer change status"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn leave_types() {
        assert!(validate_leave_type("sick").is_ok());
        assert_matches!(validate_leave_type("vacation"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn start_must_precede_end() {
        assert!(validate_date_range(d(2024, 1, 10), d(2024, 1, 15)).is_ok());
        assert_matches!(
            validate_date_range(d(2024, 1, 15), d(2024, 1, 10)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_date_range(d(2024, 1, 10), d(2024, 1, 10)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn overlapping_ranges_detected() {
        let (s, e) = (d(2024, 1, 10), d(2024, 1, 15));
        assert!(ranges_overlap(s, e, d(2024, 1, 12), d(2024, 1, 20)));
        assert!(ranges_overlap(s, e, d(2024, 1, 1), d(2024, 1, 31)));
        assert!(ranges_overlap(s, e, d(2024, 1, 15), d(2024, 1, 18)));
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let (s, e) = (d(2024, 1, 10), d(2024, 1, 15));
        assert!(!ranges_overlap(s, e, d(2024, 1, 16), d(2024, 1, 20)));
        assert!(!ranges_overlap(s, e, d(2024, 1, 1), d(2024, 1, 9)));
    }

    #[test]
    fn decisions() {
        assert!(validate_decision("approved").is_ok());
        assert!(validate_decision("rejected").is_ok());
        assert_matches!(validate_decision("pending"), Err(CoreError::Validation(_)));
        assert_matches!(validate_decision("maybe"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn only_pending_transitions() {
        assert!(validate_transition(STATUS_PENDING, STATUS_APPROVED).is_ok());
        assert!(validate_transition(STATUS_PENDING, STATUS_REJECTED).is_ok());
        assert_matches!(
            validate_transition(STATUS_APPROVED, STATUS_REJECTED),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            validate_transition(STATUS_REJECTED, STATUS_REJECTED),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn invalid_decision_wins_over_state() {
        assert_matches!(
            validate_transition(STATUS_APPROVED, "bogus"),
            Err(CoreError::Validation(_))
        );
    }
}
