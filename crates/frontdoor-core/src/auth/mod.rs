//! Authentication capability consumed by the login form.
//!
//! This module provides:
//! - `AuthProvider`: the async capability that performs login and guest login
//! - `AuthState`: an observable "is authenticated" flag providers publish to
//! - `Credentials`: the email/password pair for one submission
//! - `SessionData`: the in-memory session a provider holds after login
//!
//! Sessions are never written to disk.

pub mod credentials;
pub mod provider;
pub mod session;
pub mod state;

pub use credentials::Credentials;
pub use provider::{AuthProvider, LoginResponse};
pub use session::SessionData;
pub use state::AuthState;
