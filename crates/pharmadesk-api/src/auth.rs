// Login / logout against `/api/usuarios/login`.
//
// The backend issues an opaque token on successful login. It is stored on
// the client and attached as a bearer token from then on. Logout is purely
// client-side: the backend keeps no session to tear down.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{ApiClient, parse_error};
use crate::error::Error;

#[derive(Serialize)]
struct LoginRequest<'a> {
    gmail: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

impl ApiClient {
    /// Exchange an e-mail and password for a session token.
    ///
    /// On success the token is stored on the client and also returned so
    /// the caller can persist it. Any non-2xx response becomes
    /// [`Error::Authentication`] carrying the server's message.
    pub async fn login(&self, gmail: &str, password: &SecretString) -> Result<SecretString, Error> {
        debug!(gmail, "logging in");

        let body = LoginRequest {
            gmail,
            password: password.expose_secret(),
        };
        let resp = self.post_anonymous("usuarios/login", &body).await?;

        let status = resp.status();
        if !status.is_success() {
            let message = match parse_error(status, resp).await {
                Error::Api { message, .. } | Error::Unauthorized { message } => message,
                other => other.to_string(),
            };
            return Err(Error::Authentication { message });
        }

        let parsed: LoginResponse = self.handle_response(resp).await?;
        if parsed.token.is_empty() {
            return Err(Error::Authentication {
                message: "server returned an empty token".into(),
            });
        }

        let token = SecretString::from(parsed.token);
        self.set_token(token.clone());
        debug!("login successful");
        Ok(token)
    }

    /// Forget the current token.
    pub fn logout(&self) {
        self.clear_token();
    }
}
