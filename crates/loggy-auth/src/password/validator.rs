//! Password length policy.

use loggy_core::error::AppError;

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Longest accepted password, in characters.
pub const MAX_PASSWORD_LENGTH: usize = 64;

/// Checks submitted passwords against the length policy.
#[derive(Debug, Clone, Default)]
pub struct PasswordValidator;

impl PasswordValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Returns `BadRequest` unless the password is 12 to 64 characters.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(AppError::bad_request(format!(
                "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        let validator = PasswordValidator::new();
        assert!(validator.validate(&"a".repeat(11)).is_err());
        assert!(validator.validate(&"a".repeat(12)).is_ok());
        assert!(validator.validate(&"a".repeat(64)).is_ok());
        assert!(validator.validate(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(PasswordValidator::new().validate(&"é".repeat(12)).is_ok());
    }
}
