//! Core library for the frontdoor login flow.
//!
//! This crate holds everything that does not depend on a particular front end:
//!
//! - `form`: the `LoginForm` controller, its state and validation rules
//! - `auth`: the `AuthProvider` capability, credentials and observable auth state
//! - `api`: an HTTP implementation of `AuthProvider`
//! - `navigation`: destinations and the `Navigator` capability
//! - `diagnostics`: where absorbed faults are reported
//! - `config`: persisted user configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod diagnostics;
pub mod form;
pub mod navigation;

pub use api::{AuthError, HttpAuthClient};
pub use auth::{AuthProvider, AuthState, Credentials, LoginResponse};
pub use config::Config;
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use form::{Field, LoginForm, LoginOutcome, SubmitAttempt, ValidationError};
pub use navigation::{ChannelNavigator, Navigator, Route};
