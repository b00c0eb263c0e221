//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in the initial
//! migration.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EMPLOYEE: &str = "employee";
pub const ROLE_MANAGER: &str = "manager";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EMPLOYEE, ROLE_MANAGER];

/// Roles an anonymous caller may pick for themselves at registration.
pub const SELF_ASSIGNABLE_ROLES: &[&str] = &[ROLE_EMPLOYEE, ROLE_MANAGER];

/// Validate that a role string is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

/// Validate a role requested through self-registration.
///
/// Unknown roles are a validation error; `admin` is known but forbidden.
pub fn validate_self_assigned_role(role: &str) -> Result<(), CoreError> {
    validate_role(role)?;
    if !SELF_ASSIGNABLE_ROLES.contains(&role) {
        return Err(CoreError::Forbidden(
            "Admin accounts cannot be self-registered".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn known_roles_accepted() {
        for role in VALID_ROLES {
            assert!(validate_role(role).is_ok());
        }
    }

    #[test]
    fn unknown_role_rejected() {
        assert_matches!(validate_role("root"), Err(CoreError::Validation(_)));
        assert_matches!(validate_role(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn admin_cannot_self_register() {
        assert_matches!(
            validate_self_assigned_role(ROLE_ADMIN),
            Err(CoreError::Forbidden(_))
        );
        assert!(validate_self_assigned_role(ROLE_EMPLOYEE).is_ok());
        assert!(validate_self_assigned_role(ROLE_MANAGER).is_ok());
    }
}
