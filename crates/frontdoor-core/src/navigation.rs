//! Destinations the login flow can send the user to.

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A routed destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Where an authenticated user lands
    Landing,
    /// Where a guest session starts
    GuestEntry,
    /// Account registration
    Register,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/dashboard",
            Route::GuestEntry => "/product-input",
            Route::Register => "/register",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Dashboard",
            Route::GuestEntry => "Product Input",
            Route::Register => "Register",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The navigation collaborator.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Forwards routes to whoever owns the receiving end, usually the UI loop.
#[derive(Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        debug!(%route, "Navigating");
        if self.tx.send(route).is_err() {
            warn!(%route, "Navigation receiver dropped");
        }
    }
}
