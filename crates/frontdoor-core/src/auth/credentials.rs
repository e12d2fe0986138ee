use std::fmt;

use serde::Serialize;

/// The email/password pair submitted for one login attempt.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("user@example.com", "secret1");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("user@example.com"));
        assert!(!printed.contains("secret1"));
    }

    #[test]
    fn test_serializes_both_fields() {
        let creds = Credentials::new("user@example.com", "secret1");
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["password"], "secret1");
    }
}
