//! Department field rules.

use crate::error::CoreError;
use crate::identity::validate_name;

/// Maximum length of a department description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Validate a department name (already trimmed by the caller).
pub fn validate_department_name(name: &str) -> Result<(), CoreError> {
    validate_name("Department name", name)
}

/// Validate a department description: required, at most 500 characters.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation("Description is required".into()));
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Trim an optional update field, treating blank as "leave unchanged".
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn name_rules() {
        assert!(validate_department_name("Engineering").is_ok());
        assert_matches!(validate_department_name(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_department_name("E"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn description_rules() {
        assert!(validate_description("Builds things").is_ok());
        assert_matches!(validate_description("  "), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_description(&"d".repeat(501)),
            Err(CoreError::Validation(_))
        );
        assert!(validate_description(&"d".repeat(500)).is_ok());
    }

    #[test]
    fn blank_update_fields_are_dropped() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" Ops ")), Some("Ops".to_string()));
    }
}
