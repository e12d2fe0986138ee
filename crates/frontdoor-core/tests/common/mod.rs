//! Scripted collaborators for driving `LoginForm` in tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use frontdoor_core::{
    AuthError, AuthProvider, AuthState, Credentials, Diagnostics, LoginForm, LoginResponse,
    Navigator, Route,
};
use tokio::sync::{watch, Notify};

/// How the fake answers a call
#[derive(Debug, Clone)]
pub enum Script {
    Accept,
    Reject(Option<String>),
    Fail,
    /// Wait for `FakeAuth::release`, then accept
    Hold,
    /// Never answer
    Hang,
    /// Panic inside the provider
    Panic,
}

pub struct FakeAuth {
    login_script: Script,
    guest_script: Script,
    /// Flip the auth flag when a call succeeds, like a real provider
    publishes_state: bool,
    pub state: AuthState,
    pub login_calls: AtomicUsize,
    pub guest_calls: AtomicUsize,
    pub last_credentials: Mutex<Option<Credentials>>,
    gate: Notify,
}

impl FakeAuth {
    pub fn new(login_script: Script) -> Self {
        Self {
            login_script,
            guest_script: Script::Accept,
            publishes_state: false,
            state: AuthState::default(),
            login_calls: AtomicUsize::new(0),
            guest_calls: AtomicUsize::new(0),
            last_credentials: Mutex::new(None),
            gate: Notify::new(),
        }
    }

    pub fn with_guest(mut self, script: Script) -> Self {
        self.guest_script = script;
        self
    }

    pub fn publishing_state(mut self) -> Self {
        self.publishes_state = true;
        self
    }

    pub fn authenticated(self) -> Self {
        self.state.set_authenticated(true);
        self
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn guest_calls(&self) -> usize {
        self.guest_calls.load(Ordering::SeqCst)
    }

    async fn run(&self, script: &Script) -> Result<bool, AuthError> {
        match script {
            Script::Accept => Ok(true),
            Script::Reject(_) => Ok(false),
            Script::Fail => Err(AuthError::Other("connection reset".to_string())),
            Script::Hold => {
                self.gate.notified().await;
                Ok(true)
            }
            Script::Hang => {
                std::future::pending::<()>().await;
                Ok(false)
            }
            Script::Panic => panic!("auth provider crashed"),
        }
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_credentials.lock().unwrap() = Some(credentials.clone());

        let accepted = self.run(&self.login_script).await?;
        if accepted {
            if self.publishes_state {
                self.state.set_authenticated(true);
            }
            Ok(LoginResponse::accepted())
        } else {
            let message = match &self.login_script {
                Script::Reject(message) => message.clone(),
                _ => None,
            };
            Ok(LoginResponse::rejected(message))
        }
    }

    async fn login_as_guest(&self) -> Result<(), AuthError> {
        self.guest_calls.fetch_add(1, Ordering::SeqCst);
        let accepted = self.run(&self.guest_script).await?;
        if accepted && self.publishes_state {
            self.state.set_authenticated(true);
        }
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, operation: &str, error: &AuthError) {
        self.entries
            .lock()
            .unwrap()
            .push(format!("{}: {}", operation, error));
    }
}

pub struct Harness {
    pub auth: Arc<FakeAuth>,
    pub navigator: Arc<RecordingNavigator>,
    pub diagnostics: Arc<RecordingDiagnostics>,
}

impl Harness {
    pub fn new(auth: FakeAuth) -> Self {
        Self {
            auth: Arc::new(auth),
            navigator: Arc::new(RecordingNavigator::default()),
            diagnostics: Arc::new(RecordingDiagnostics::default()),
        }
    }

    pub fn mount(&self) -> LoginForm {
        LoginForm::mount(
            self.auth.clone(),
            self.navigator.clone(),
            self.diagnostics.clone(),
        )
    }
}
