//! Employee vocabularies, field rules, and employee code generation.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Vocabularies
// ---------------------------------------------------------------------------

pub const GENDER_MALE: &str = "male";
pub const GENDER_FEMALE: &str = "female";
pub const GENDER_OTHER: &str = "other";

/// All valid gender values.
pub const VALID_GENDERS: &[&str] = &[GENDER_MALE, GENDER_FEMALE, GENDER_OTHER];

/// All valid marital status values.
pub const VALID_MARITAL_STATUSES: &[&str] = &["married", "single", "divorced", "widowed"];

/// All valid designation values.
pub const VALID_DESIGNATIONS: &[&str] =
    &["manager", "developer", "designer", "tester", "hr", "other"];

fn validate_one_of(field: &str, value: &str, valid: &[&str]) -> Result<(), CoreError> {
    if valid.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            valid.join(", ")
        )))
    }
}

pub fn validate_gender(value: &str) -> Result<(), CoreError> {
    validate_one_of("gender", value, VALID_GENDERS)
}

pub fn validate_marital_status(value: &str) -> Result<(), CoreError> {
    validate_one_of("marital status", value, VALID_MARITAL_STATUSES)
}

pub fn validate_designation(value: &str) -> Result<(), CoreError> {
    validate_one_of("designation", value, VALID_DESIGNATIONS)
}

/// The advisory salary on an employee must be a finite, non-negative number.
pub fn validate_salary(salary: f64) -> Result<(), CoreError> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(CoreError::Validation(
            "Salary must be a non-negative number".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Employee code
// ---------------------------------------------------------------------------

/// Used when a name has no ASCII alphanumerics to slug.
const FALLBACK_CODE_STEM: &str = "emp";

/// Reduce a name to lowercase ASCII alphanumerics joined by single hyphens.
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Build an employee code from a name and an explicit suffix.
pub fn employee_code_with_suffix(name: &str, suffix: &str) -> String {
    let stem = slug(name);
    let stem = if stem.is_empty() {
        FALLBACK_CODE_STEM
    } else {
        stem.as_str()
    };
    format!("{stem}-{suffix}")
}

/// Generate a fresh employee code: `slug(name)-xxxxxxxx` with eight random
/// lowercase hex digits.
pub fn generate_employee_code(name: &str) -> String {
    let suffix = format!("{:08x}", rand::random::<u32>());
    employee_code_with_suffix(name, &suffix)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn vocabularies_accept_known_values() {
        assert!(validate_gender("female").is_ok());
        assert!(validate_marital_status("widowed").is_ok());
        assert!(validate_designation("hr").is_ok());
    }

    #[test]
    fn vocabularies_reject_unknown_values() {
        assert_matches!(validate_gender("robot"), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_marital_status("complicated"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(validate_designation("ceo"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_salary_rejected() {
        assert!(validate_salary(0.0).is_ok());
        assert_matches!(validate_salary(-1.0), Err(CoreError::Validation(_)));
        assert_matches!(validate_salary(f64::NAN), Err(CoreError::Validation(_)));
    }

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slug("  Alice   van der Berg!"), "alice-van-der-berg");
        assert_eq!(slug("O'Neil"), "o-neil");
    }

    #[test]
    fn code_uses_fallback_stem() {
        assert_eq!(employee_code_with_suffix("李雷", "0000abcd"), "emp-0000abcd");
    }

    #[test]
    fn generated_code_shape() {
        let code = generate_employee_code("Alice Smith");
        let (stem, suffix) = code.rsplit_once('-').unwrap();
        assert_eq!(stem, "alice-smith");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn generated_codes_differ() {
        assert_ne!(generate_employee_code("Bob"), generate_employee_code("Bob"));
    }
}
