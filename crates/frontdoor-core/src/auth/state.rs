use tokio::sync::watch;
use tracing::debug;

/// Observable authentication flag.
///
/// Providers hold one of these and flip it when a session starts or ends;
/// observers get a `watch::Receiver` and see every transition.
#[derive(Debug)]
pub struct AuthState {
    tx: watch::Sender<bool>,
}

impl AuthState {
    pub fn new(authenticated: bool) -> Self {
        let (tx, _rx) = watch::channel(authenticated);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        *self.tx.borrow()
    }

    /// Publish a new value. Observers are only woken on an actual change.
    pub fn set_authenticated(&self, authenticated: bool) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == authenticated {
                false
            } else {
                *current = authenticated;
                true
            }
        });
        if changed {
            debug!(authenticated, "Auth state changed");
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new(false)
    }
}
