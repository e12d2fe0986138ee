//! The login form controller.
//!
//! `LoginForm` owns the form state and drives the two auth operations. Calls
//! to the auth provider run as background tasks and report back through a
//! channel, so the UI loop stays responsive; `poll` applies whatever has
//! finished. The `*_and_wait` variants await the result directly.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::state::FormState;
use super::validation::Field;
use crate::api::AuthError;
use crate::auth::{AuthProvider, LoginResponse};
use crate::diagnostics::Diagnostics;
use crate::navigation::{Navigator, Route};

// ============================================================================
// Constants
// ============================================================================

/// Buffer for finished background calls. One login plus a few guest clicks.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Default upper bound on a single auth call.
const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Shown when the service refuses credentials without saying why
const DEFAULT_REJECTION_NOTICE: &str = "Invalid email or password";

// ============================================================================
// Outcomes
// ============================================================================

/// How a login call ended.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials accepted
    Success,
    /// The service answered but refused the credentials
    Rejected { message: Option<String> },
    /// The service could not answer
    Fault(AuthError),
}

impl LoginOutcome {
    pub fn from_result(result: Result<LoginResponse, AuthError>) -> Self {
        match result {
            Ok(response) if response.success => LoginOutcome::Success,
            Ok(response) => LoginOutcome::Rejected {
                message: response.message,
            },
            Err(e) => LoginOutcome::Fault(e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success)
    }
}

/// What happened when submit was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Login call is under way
    Started,
    /// A field failed validation; nothing was sent
    Invalid,
    /// A previous submission is still outstanding
    Busy,
}

/// Finished background calls
enum TaskResult {
    Login(Result<LoginResponse, AuthError>),
    Guest(Result<(), AuthError>),
}

// ============================================================================
// LoginForm
// ============================================================================

pub struct LoginForm {
    state: FormState,
    auth: Arc<dyn AuthProvider>,
    navigator: Arc<dyn Navigator>,
    diagnostics: Arc<dyn Diagnostics>,
    auth_rx: watch::Receiver<bool>,
    /// Navigation away from the form already issued for the current
    /// authenticated period
    navigated: bool,
    login_timeout: Duration,
    result_tx: mpsc::Sender<TaskResult>,
    result_rx: mpsc::Receiver<TaskResult>,
}

impl LoginForm {
    /// Create the form. An actor who is already authenticated is sent to the
    /// landing destination straight away.
    pub fn mount(
        auth: Arc<dyn AuthProvider>,
        navigator: Arc<dyn Navigator>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        let mut auth_rx = auth.subscribe();
        let authenticated = *auth_rx.borrow_and_update();
        let (result_tx, result_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let mut form = Self {
            state: FormState::new(),
            auth,
            navigator,
            diagnostics,
            auth_rx,
            navigated: false,
            login_timeout: DEFAULT_LOGIN_TIMEOUT,
            result_tx,
            result_rx,
        };

        if authenticated {
            debug!("Already authenticated at mount");
            form.go_landing();
        }
        form
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.login_timeout = timeout;
        self
    }

    /// Fill fields without marking them touched
    pub fn prefill(&mut self, email: &str, password: &str) {
        self.state.set_value(Field::Email, email);
        self.state.set_value(Field::Password, password);
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn input_char(&mut self, field: Field, c: char) -> bool {
        self.state.push_char(field, c)
    }

    pub fn backspace(&mut self, field: Field) {
        self.state.pop_char(field);
    }

    /// Returns false if the value had to be altered to fit the field
    pub fn set_value(&mut self, field: Field, value: &str) -> bool {
        self.state.set_value(field, value)
    }

    /// Focus left a field
    pub fn blur(&mut self, field: Field) {
        self.state.touch(field);
    }

    /// The submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.state.is_busy()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Validate and start a login call in the background.
    pub fn submit(&mut self) -> SubmitAttempt {
        if self.state.is_busy() {
            debug!("Submit ignored while a login is outstanding");
            return SubmitAttempt::Busy;
        }

        if !self.state.validate_all() {
            debug!(
                email = ?self.state.error(Field::Email),
                password = ?self.state.error(Field::Password),
                "Submit blocked by validation"
            );
            return SubmitAttempt::Invalid;
        }

        let credentials = self.state.credentials();
        self.state.begin_submission();
        // Each accepted submission earns one landing navigation, even when a
        // guest session or an earlier redirect already left the form
        self.navigated = false;

        let auth = Arc::clone(&self.auth);
        let tx = self.result_tx.clone();
        let timeout = self.login_timeout;

        tokio::spawn(async move {
            let result =
                run_auth_call(timeout, async move { auth.login(&credentials).await }).await;
            // Receiver is gone if the form was dropped
            let _ = tx.send(TaskResult::Login(result)).await;
        });

        SubmitAttempt::Started
    }

    /// Submit and wait for the login call to finish.
    /// Returns `None` when no call was started.
    pub async fn submit_and_wait(&mut self) -> Option<LoginOutcome> {
        if self.submit() != SubmitAttempt::Started {
            return None;
        }
        self.wait_for_login().await
    }

    /// Wait for the outstanding login call, applying anything else that
    /// finishes in the meantime.
    pub async fn wait_for_login(&mut self) -> Option<LoginOutcome> {
        if !self.state.is_busy() {
            return None;
        }
        while let Some(result) = self.result_rx.recv().await {
            if let Some(outcome) = self.apply(result) {
                return Some(outcome);
            }
        }
        None
    }

    /// Start a guest session in the background. Always ends on the guest-entry
    /// destination, whether or not the call succeeded.
    pub fn guest_login(&mut self) {
        let auth = Arc::clone(&self.auth);
        let tx = self.result_tx.clone();
        let timeout = self.login_timeout;

        tokio::spawn(async move {
            let result = run_auth_call(timeout, async move { auth.login_as_guest().await }).await;
            let _ = tx.send(TaskResult::Guest(result)).await;
        });
    }

    pub async fn guest_login_and_wait(&mut self) {
        self.guest_login();
        while let Some(result) = self.result_rx.recv().await {
            let is_guest = matches!(result, TaskResult::Guest(_));
            self.apply(result);
            if is_guest {
                return;
            }
        }
    }

    pub fn open_register(&self) {
        self.navigator.navigate(Route::Register);
    }

    /// Apply finished calls and auth-state changes. Call once per UI tick.
    pub fn poll(&mut self) -> Option<LoginOutcome> {
        let mut last = None;
        while let Ok(result) = self.result_rx.try_recv() {
            if let Some(outcome) = self.apply(result) {
                last = Some(outcome);
            }
        }
        self.sync_auth_state();
        last
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply(&mut self, result: TaskResult) -> Option<LoginOutcome> {
        match result {
            TaskResult::Login(result) => {
                let outcome = LoginOutcome::from_result(result);
                self.finish_login(&outcome);
                Some(outcome)
            }
            TaskResult::Guest(result) => {
                self.finish_guest(result);
                None
            }
        }
    }

    fn finish_login(&mut self, outcome: &LoginOutcome) {
        self.state.end_submission();
        match outcome {
            LoginOutcome::Success => {
                info!("Login successful");
                self.state.reset();
                self.go_landing();
            }
            LoginOutcome::Rejected { message } => {
                warn!(reason = ?message, "Login rejected");
                let notice = message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION_NOTICE.to_string());
                self.state.set_notice(notice);
            }
            LoginOutcome::Fault(e) => {
                self.diagnostics.report("login", e);
            }
        }
    }

    fn finish_guest(&mut self, result: Result<(), AuthError>) {
        match result {
            Ok(()) => info!("Guest login finished"),
            Err(e) => self.diagnostics.report("guest_login", &e),
        }
        // A guest session must not be bounced on to the landing page
        if *self.auth_rx.borrow() {
            self.navigated = true;
        }
        self.navigator.navigate(Route::GuestEntry);
    }

    fn sync_auth_state(&mut self) {
        if !self.auth_rx.has_changed().unwrap_or(false) {
            return;
        }
        let authenticated = *self.auth_rx.borrow_and_update();
        if authenticated {
            self.go_landing();
        } else {
            self.navigated = false;
        }
    }

    fn go_landing(&mut self) {
        if self.navigated {
            return;
        }
        self.navigated = true;
        self.navigator.navigate(Route::Landing);
    }
}

/// Run one auth call on its own task, bounded by `timeout`. A call that
/// panics or is cancelled comes back as an error instead of never answering.
async fn run_auth_call<T, F>(timeout: Duration, call: F) -> Result<T, AuthError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, AuthError>> + Send + 'static,
{
    match tokio::spawn(tokio::time::timeout(timeout, call)).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(AuthError::Timeout(timeout)),
        Err(e) => {
            warn!(error = %e, "Auth call task failed");
            Err(AuthError::Other(format!("auth call did not complete: {}", e)))
        }
    }
}
