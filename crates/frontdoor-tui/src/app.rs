//! Application state management for the frontdoor TUI.
//!
//! `App` owns the auth client, the mounted login form (while the login
//! screen is showing) and the receiving end of the navigator. Routes the
//! form asks for are applied on the next tick.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use frontdoor_core::auth::SessionData;
use frontdoor_core::{
    AuthError, ChannelNavigator, Config, Diagnostics, Field, HttpAuthClient, LoginForm,
    Route, SubmitAttempt, TracingDiagnostics,
};

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    LoggingIn,
    Viewing(Route),
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
    Guest,
    Register,
}

impl LoginFocus {
    pub fn next(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::Button,
            LoginFocus::Button => LoginFocus::Guest,
            LoginFocus::Guest => LoginFocus::Register,
            LoginFocus::Register => LoginFocus::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Register,
            LoginFocus::Password => LoginFocus::Email,
            LoginFocus::Button => LoginFocus::Password,
            LoginFocus::Guest => LoginFocus::Button,
            LoginFocus::Register => LoginFocus::Guest,
        }
    }

    /// The text field under this focus, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            LoginFocus::Email => Some(Field::Email),
            LoginFocus::Password => Some(Field::Password),
            _ => None,
        }
    }
}

pub struct App {
    pub config: Config,
    pub state: AppState,
    pub login_focus: LoginFocus,
    pub status_message: Option<String>,

    /// Mounted only while the login screen is showing
    pub form: Option<LoginForm>,

    client: Arc<HttpAuthClient>,
    navigator: Arc<ChannelNavigator>,
    nav_rx: mpsc::UnboundedReceiver<Route>,
    diagnostics: Arc<dyn Diagnostics>,

    /// Email of the submission in flight, remembered on success
    pending_email: Option<String>,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let auth_url = config.auth_url().ok_or(AuthError::NotConfigured)?;
        debug!(%auth_url, "Auth endpoint configured");
        let client = Arc::new(HttpAuthClient::new(&auth_url)?);

        let (navigator, nav_rx) = ChannelNavigator::new();

        Ok(Self {
            config,
            state: AppState::LoggingIn,
            login_focus: LoginFocus::Email,
            status_message: None,
            form: None,
            client,
            navigator: Arc::new(navigator),
            nav_rx,
            diagnostics: Arc::new(TracingDiagnostics),
            pending_email: None,
        })
    }

    // =========================================================================
    // Login screen
    // =========================================================================

    /// Mount a fresh login form and show it
    pub fn start_login(&mut self) {
        let mut form = LoginForm::mount(
            self.client.clone(),
            self.navigator.clone(),
            self.diagnostics.clone(),
        )
        .with_timeout(self.config.login_timeout());

        form.prefill(&self.config.initial_email(), &self.config.initial_password());
        self.login_focus = if form.state().value(Field::Email).is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };

        self.form = Some(form);
        self.state = AppState::LoggingIn;
        self.status_message = None;
    }

    /// Move focus, marking the field being left as touched
    pub fn move_focus(&mut self, to: LoginFocus) {
        if let (Some(form), Some(field)) = (self.form.as_mut(), self.login_focus.field()) {
            form.blur(field);
        }
        self.login_focus = to;
    }

    pub fn submit_login(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let email = form.state().credentials().email;
        match form.submit() {
            SubmitAttempt::Started => {
                self.pending_email = Some(email);
                self.status_message = Some("Signing in...".to_string());
            }
            SubmitAttempt::Invalid => {
                // Put the cursor on the first field that needs fixing
                if form.state().error(Field::Email).is_some() {
                    self.login_focus = LoginFocus::Email;
                } else if form.state().error(Field::Password).is_some() {
                    self.login_focus = LoginFocus::Password;
                }
            }
            SubmitAttempt::Busy => {}
        }
    }

    pub fn guest_login(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.guest_login();
            self.status_message = Some("Starting guest session...".to_string());
        }
    }

    pub fn open_register(&self) {
        if let Some(ref form) = self.form {
            form.open_register();
        }
    }

    // =========================================================================
    // Routed pages
    // =========================================================================

    pub fn session(&self) -> Option<SessionData> {
        self.client.session()
    }

    pub fn logout(&mut self) {
        info!("Logging out");
        self.client.logout();
        self.start_login();
    }

    // =========================================================================
    // Background work
    // =========================================================================

    /// Apply finished auth calls and any navigation they triggered
    pub fn check_background_tasks(&mut self) {
        if let Some(form) = self.form.as_mut() {
            if let Some(outcome) = form.poll() {
                self.status_message = None;
                if outcome.is_success() {
                    self.remember_email();
                }
            }
        }

        while let Ok(route) = self.nav_rx.try_recv() {
            self.navigate_to(route);
        }
    }

    fn remember_email(&mut self) {
        if let Some(email) = self.pending_email.take() {
            self.config.last_email = Some(email);
            if let Err(e) = self.config.save() {
                warn!(error = %e, "Failed to save config");
            }
        }
    }

    fn navigate_to(&mut self, route: Route) {
        debug!(%route, "Showing route");
        // Leaving the login screen unmounts the form
        self.form = None;
        self.status_message = None;
        self.state = AppState::Viewing(route);
    }
}
