//! HTTP auth client.
//!
//! `HttpAuthClient` implements `AuthProvider` against a JSON auth endpoint:
//! `POST {auth_url}/login` and `POST {auth_url}/guest`. The session it gets
//! back is kept in memory only.

pub mod client;
pub mod error;

pub use client::HttpAuthClient;
pub use error::AuthError;
