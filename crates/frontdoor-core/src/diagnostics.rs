//! Sink for faults the login form absorbs instead of propagating.

use tracing::error;

use crate::api::AuthError;

pub trait Diagnostics: Send + Sync {
    /// Record one absorbed fault. `operation` names what was being attempted.
    fn report(&self, operation: &str, error: &AuthError);
}

/// Reports faults through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, operation: &str, error: &AuthError) {
        error!(operation, error = %error, "Auth operation failed");
    }
}
