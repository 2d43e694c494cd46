// ── Runtime console configuration ──
//
// Describes *where* the backend lives and how to reach it. The binary
// builds a `ConsoleConfig` from flags, env, and the profile file and hands
// it in; core never reads config files.

use std::time::Duration;

use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging backends).
    DangerAcceptInvalid,
}

/// Configuration for one backend.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend root, e.g. `http://localhost:5000`. `/api/...` is appended.
    pub api_url: Url,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl ConsoleConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub(crate) fn transport(&self) -> pharmadesk_api::TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => pharmadesk_api::TlsMode::System,
            TlsVerification::CustomCa(path) => pharmadesk_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => pharmadesk_api::TlsMode::DangerAcceptInvalid,
        };
        pharmadesk_api::TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
