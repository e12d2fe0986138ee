use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::watch;

use super::Credentials;
use crate::api::AuthError;

/// What the auth service said about a set of credentials.
///
/// Only `success` drives the form; `message` is shown to the user when the
/// credentials are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: Option<String>) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

/// The auth collaborator the login form is built against.
///
/// Implementations own whatever session they create; the form only looks at
/// the outcome of each call and at the published authentication flag.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Check credentials. `Ok` with `success: false` is a rejection,
    /// `Err` is a fault (the service could not answer).
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError>;

    /// Start a guest session.
    async fn login_as_guest(&self) -> Result<(), AuthError>;

    /// Subscribe to the "already authenticated" flag.
    fn subscribe(&self) -> watch::Receiver<bool>;

    fn is_authenticated(&self) -> bool {
        *self.subscribe().borrow()
    }
}
