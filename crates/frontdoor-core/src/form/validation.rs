//! Field rules for the login form.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for the email field.
/// 254 is the longest address SMTP will carry.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for the password field.
/// 128 chars accommodates password managers and passphrases.
pub const MAX_PASSWORD_LENGTH: usize = 128;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// A form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Password,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Email, Field::Password];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::Password => "Password",
        }
    }

    pub fn max_length(&self) -> usize {
        match self {
            Field::Email => MAX_EMAIL_LENGTH,
            Field::Password => MAX_PASSWORD_LENGTH,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("is required")]
    Required,

    #[error("is not a valid email address")]
    InvalidFormat,
}

impl ValidationError {
    /// Message shown next to the field
    pub fn message(&self, field: Field) -> String {
        match self {
            ValidationError::Required => format!("{} is required", field.label()),
            ValidationError::InvalidFormat => "Enter a valid email address".to_string(),
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required);
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidFormat);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    Ok(())
}

pub fn validate_field(field: Field, value: &str) -> Result<(), ValidationError> {
    match field {
        Field::Email => validate_email(value),
        Field::Password => validate_password(value),
    }
}

/// Check if a character should be accepted into a field holding `current_len` chars
pub fn can_add_char(field: Field, current_len: usize, c: char) -> bool {
    current_len < field.max_length() && !c.is_control()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_required() {
        assert_eq!(validate_email(""), Err(ValidationError::Required));
        assert_eq!(validate_email("   "), Err(ValidationError::Required));
    }

    #[test]
    fn test_email_format() {
        assert_eq!(validate_email("user@example.com"), Ok(()));
        assert_eq!(validate_email("first.last+tag@sub.example.co"), Ok(()));
        assert_eq!(validate_email("  user@example.com  "), Ok(()));

        assert_eq!(validate_email("userexample.com"), Err(ValidationError::InvalidFormat));
        assert_eq!(validate_email("user@"), Err(ValidationError::InvalidFormat));
        assert_eq!(validate_email("user@example"), Err(ValidationError::InvalidFormat));
        assert_eq!(validate_email("@example.com"), Err(ValidationError::InvalidFormat));
        assert_eq!(validate_email("user @example.com"), Err(ValidationError::InvalidFormat));
    }

    #[test]
    fn test_password_has_no_complexity_rule() {
        assert_eq!(validate_password("a"), Ok(()));
        assert_eq!(validate_password(""), Err(ValidationError::Required));
        assert_eq!(validate_password("  "), Err(ValidationError::Required));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::Required.message(Field::Email), "Email is required");
        assert_eq!(ValidationError::Required.message(Field::Password), "Password is required");
        assert_eq!(
            ValidationError::InvalidFormat.message(Field::Email),
            "Enter a valid email address"
        );
    }

    #[test]
    fn test_can_add_char() {
        assert!(can_add_char(Field::Email, 0, 'a'));
        assert!(can_add_char(Field::Email, MAX_EMAIL_LENGTH - 1, '@'));
        assert!(!can_add_char(Field::Email, MAX_EMAIL_LENGTH, 'a'));
        assert!(can_add_char(Field::Password, MAX_PASSWORD_LENGTH - 1, '!'));
        assert!(!can_add_char(Field::Password, MAX_PASSWORD_LENGTH, 'a'));
        // Control characters rejected
        assert!(!can_add_char(Field::Email, 0, '\n'));
        assert!(!can_add_char(Field::Password, 0, '\x00'));
    }
}
