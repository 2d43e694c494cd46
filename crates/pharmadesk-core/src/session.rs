// ── Session context ──
//
// Process-wide "are we logged in" flag plus the opaque token, published
// through a `watch` channel so any number of observers (route guard,
// status line) see changes immediately. There is no refresh or expiry: a
// token is trusted until it is cleared.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub token: Option<SecretString>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Shared, cloneable handle on the session.
#[derive(Debug, Clone)]
pub struct Session {
    tx: Arc<watch::Sender<SessionState>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Unauthenticated session.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Session initialized from a persisted token, if any.
    pub fn restore(token: Option<SecretString>) -> Self {
        let session = Self::new();
        if let Some(token) = token {
            debug!("session restored from stored token");
            session.login(token);
        }
        session
    }

    pub fn login(&self, token: SecretString) {
        self.tx.send_replace(SessionState { token: Some(token) });
    }

    pub fn logout(&self) {
        self.tx.send_replace(SessionState { token: None });
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    pub fn token(&self) -> Option<SecretString> {
        self.tx.borrow().token.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}
