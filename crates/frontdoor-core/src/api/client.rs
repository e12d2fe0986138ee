//! Auth client for a JSON login endpoint.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::Deserialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::AuthError;
use crate::auth::{AuthProvider, AuthState, Credentials, LoginResponse, SessionData};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// The form applies its own overall timeout on top of this.
const REQUEST_TIMEOUT_SECS: u64 = 30;

const LOGIN_PATH: &str = "login";
const GUEST_PATH: &str = "guest";

#[derive(Debug, Deserialize)]
struct LoginBody {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GuestBody {
    #[serde(default)]
    token: Option<String>,
}

/// `AuthProvider` backed by a remote JSON endpoint.
pub struct HttpAuthClient {
    client: Client,
    base_url: String,
    state: AuthState,
    session: Mutex<Option<SessionData>>,
}

impl HttpAuthClient {
    pub fn new(base_url: &str) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            state: AuthState::default(),
            session: Mutex::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Current in-memory session, if any
    pub fn session(&self) -> Option<SessionData> {
        self.lock_session().clone()
    }

    /// Drop the session and publish the signed-out state
    pub fn logout(&self) {
        *self.lock_session() = None;
        self.state.set_authenticated(false);
    }

    fn start_session(&self, session: SessionData) {
        *self.lock_session() = Some(session);
        self.state.set_authenticated(true);
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<SessionData>> {
        // A poisoned lock still holds a usable Option
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn check_response(response: Response) -> Result<Response, AuthError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AuthError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl AuthProvider for HttpAuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        let url = self.endpoint(LOGIN_PATH);
        debug!(%url, email = %credentials.email, "Sending login request");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(credentials)
            .send()
            .await?;

        let response = match Self::check_response(response).await {
            Ok(response) => response,
            Err(e) if e.is_rejection() => {
                warn!(error = %e, "Credentials rejected");
                return Ok(LoginResponse::rejected(None));
            }
            Err(e) => return Err(e),
        };

        let body: LoginBody = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        if body.success {
            self.start_session(SessionData::for_user(&credentials.email, body.token));
            info!(email = %credentials.email, "Login accepted");
            Ok(LoginResponse::accepted())
        } else {
            Ok(LoginResponse::rejected(body.message))
        }
    }

    async fn login_as_guest(&self) -> Result<(), AuthError> {
        let url = self.endpoint(GUEST_PATH);
        debug!(%url, "Sending guest login request");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let response = Self::check_response(response).await?;

        // Servers may answer with an empty body
        let text = response.text().await?;
        let body: GuestBody = if text.trim().is_empty() {
            GuestBody::default()
        } else {
            serde_json::from_str(&text).map_err(|e| AuthError::InvalidResponse(e.to_string()))?
        };

        self.start_session(SessionData::guest(body.token));
        info!("Guest session started");
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}
