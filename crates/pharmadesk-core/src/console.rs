// ── Console facade ──
//
// Owns the HTTP client and the session and keeps the two in step: the
// token the session publishes is always the one the client sends.

use std::sync::Arc;

use pharmadesk_api::ApiClient;
use secrecy::SecretString;
use tracing::{info, warn};

use crate::config::ConsoleConfig;
use crate::error::CoreError;
use crate::guard::{Route, RouteGuard};
use crate::session::Session;

#[derive(Clone)]
pub struct Console {
    api: Arc<ApiClient>,
    session: Session,
    guard: RouteGuard,
}

impl Console {
    /// Build the HTTP client for `config`. No request is made.
    pub fn new(config: &ConsoleConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.api_url.clone(), &config.transport())?;
        Ok(Self::with_client(api))
    }

    pub fn with_client(api: ApiClient) -> Self {
        let session = Session::new();
        Self {
            api: Arc::new(api),
            guard: RouteGuard::new(session.clone()),
            session,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Adopt a previously stored token.
    pub fn restore(&self, token: Option<SecretString>) {
        match token {
            Some(token) => {
                self.api.set_token(token.clone());
                self.session.login(token);
            }
            None => self.logout_quietly(),
        }
    }

    /// Log in and return the route to show next (Home).
    ///
    /// Rejected credentials and server-side errors both surface as
    /// "invalid username or password"; an unreachable backend keeps its
    /// connection error so the user can tell the two apart.
    pub async fn login(&self, gmail: &str, password: &SecretString) -> Result<Route, CoreError> {
        match self.api.login(gmail, password).await {
            Ok(token) => {
                self.session.login(token);
                info!(gmail, "logged in");
                Ok(Route::Home)
            }
            Err(e) => {
                self.logout_quietly();
                warn!(gmail, error = %e, "login failed");
                Err(match CoreError::from(e) {
                    err @ (CoreError::ConnectionFailed { .. }
                    | CoreError::Timeout
                    | CoreError::LoginFailed { .. }) => err,
                    other => CoreError::LoginFailed {
                        reason: other.to_string(),
                    },
                })
            }
        }
    }

    pub fn logout(&self) {
        self.logout_quietly();
        info!("logged out");
    }

    fn logout_quietly(&self) {
        self.api.logout();
        self.session.logout();
    }

    /// Guarded navigation.
    pub fn open(&self, route: Route) -> Result<Route, CoreError> {
        self.guard.require(route)
    }
}
