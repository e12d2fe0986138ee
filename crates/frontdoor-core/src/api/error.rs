use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unauthorized - credentials were not accepted")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out after {0:?} waiting for the auth service")]
    Timeout(Duration),

    #[error("No auth endpoint configured")]
    NotConfigured,

    #[error("{0}")]
    Other(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl AuthError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... (truncated, {} total bytes)", cut, body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => AuthError::Unauthorized,
            403 => AuthError::AccessDenied(truncated),
            500..=599 => AuthError::ServerError(truncated),
            _ => AuthError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Whether this error means the credentials themselves were refused,
    /// as opposed to the service being unreachable or broken.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AuthError::Unauthorized | AuthError::AccessDenied(_))
    }
}
