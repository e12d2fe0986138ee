use chrono::{DateTime, Utc};

/// An authenticated session held in memory by a provider.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub token: Option<String>,
    pub email: Option<String>,
    pub guest: bool,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn for_user(email: &str, token: Option<String>) -> Self {
        Self {
            token,
            email: Some(email.to_string()),
            guest: false,
            created_at: Utc::now(),
        }
    }

    pub fn guest(token: Option<String>) -> Self {
        Self {
            token,
            email: None,
            guest: true,
            created_at: Utc::now(),
        }
    }

    /// Name to show in the UI
    pub fn display_name(&self) -> &str {
        match self.email {
            Some(ref email) => email,
            None => "guest",
        }
    }
}
