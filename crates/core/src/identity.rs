//! Identity (login account) field rules: names, emails, passwords.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum length of a person or department name, in characters.
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum length of a person or department name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Emails are stored and compared lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate an (already normalized) email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".into()));
    }
    if !email.to_owned().validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate a display name (trimmed, 2-100 characters).
pub fn validate_name(field: &str, name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "{field} must be between {MIN_NAME_LENGTH} and {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that a password meets the minimum length.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Alice@Co.COM "), "alice@co.com");
    }

    #[test]
    fn valid_email_passes() {
        assert!(validate_email("alice@co.com").is_ok());
    }

    #[test]
    fn malformed_email_fails() {
        assert_matches!(validate_email("alice"), Err(CoreError::Validation(_)));
        assert_matches!(validate_email(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn name_length_bounds() {
        assert!(validate_name("Name", "Al").is_ok());
        assert_matches!(validate_name("Name", "A"), Err(CoreError::Validation(_)));
        assert_matches!(validate_name("Name", "   "), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_name("Name", &"x".repeat(101)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn password_minimum() {
        assert!(validate_password("secret").is_ok());
        assert_matches!(validate_password("short"), Err(CoreError::Validation(_)));
    }
}
