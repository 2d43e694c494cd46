//! Shared configuration for the pharmadesk CLI.
//!
//! TOML profiles, env overrides, session token persistence (keyring with a
//! plaintext file fallback), and translation to
//! `pharmadesk_core::ConsoleConfig`. The CLI adds flag-aware wrappers on
//! top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use pharmadesk_core::{ConsoleConfig, TlsVerification};

/// Backend used when neither a flag, the environment, nor a profile names one.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Env var that relocates the config file (tests, portable installs).
pub const CONFIG_PATH_ENV: &str = "PHARMADESK_CONFIG";

const KEYRING_SERVICE: &str = "pharmadesk";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Active profile name: flag, then `default_profile`, then "default".
    pub fn active_profile_name(&self, flag: Option<&str>) -> String {
        flag.map(ToOwned::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Store session tokens in the system keyring when available.
    #[serde(default = "default_use_keyring")]
    pub use_keyring: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            use_keyring: default_use_keyring(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_use_keyring() -> bool {
    true
}

/// A named backend profile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Backend root URL (e.g., "https://pharmacies.example.org").
    pub api_url: String,

    /// Login e-mail remembered for `pharmadesk login`.
    pub email: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

impl Profile {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            email: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `PHARMADESK_CONFIG`, else XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "pharmadesk", "pharmadesk").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("pharmadesk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from a specific file. A missing file yields the defaults.
///
/// Nested keys come from the environment with a double underscore:
/// `PHARMADESK_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PHARMADESK_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file is missing or broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

/// Parse and check a backend URL (http or https only).
pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url: Url = raw.trim().parse().map_err(|e| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL {raw:?}: {e}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("unsupported scheme '{other}', expected http or https"),
        }),
    }
}

/// Build a `ConsoleConfig` from a profile and the global defaults, with
/// no CLI overrides.
pub fn profile_to_console_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ConsoleConfig, ConfigError> {
    let api_url = parse_api_url(&profile.api_url)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(ConsoleConfig {
        api_url,
        tls,
        timeout,
    })
}

// ── Session token storage ───────────────────────────────────────────

/// Profile names become file names, so they must stay a single path
/// component.
pub fn validate_profile_name(name: &str) -> Result<(), ConfigError> {
    let reason = if name.trim().is_empty() {
        Some("must not be empty")
    } else if name.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if name == "." || name.contains("..") {
        Some("must not contain '..'")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ConfigError::Validation {
            field: "profile".into(),
            reason: format!("{name:?} {reason}"),
        }),
        None => Ok(()),
    }
}

/// Where a token ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLocation {
    Keyring,
    File(PathBuf),
}

/// Persists the login token for one profile.
///
/// Tries the system keyring (`pharmadesk` / `{profile}/token`) first and
/// falls back to `tokens/{profile}` beside the config file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    profile: String,
    file: PathBuf,
    use_keyring: bool,
}

impl TokenStore {
    /// Store for `profile` next to the canonical config file.
    pub fn for_profile(profile: &str, config: &Config) -> Result<Self, ConfigError> {
        Self::at(profile, &config_path(), config.defaults.use_keyring)
    }

    /// Store next to an explicit config file path.
    pub fn at(profile: &str, config_file: &Path, use_keyring: bool) -> Result<Self, ConfigError> {
        validate_profile_name(profile)?;
        let dir = config_file.parent().map_or_else(PathBuf::new, Path::to_path_buf);
        Ok(Self {
            profile: profile.to_owned(),
            file: dir.join("tokens").join(profile),
            use_keyring,
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file
    }

    fn entry(&self) -> Option<keyring::Entry> {
        if !self.use_keyring {
            return None;
        }
        keyring::Entry::new(KEYRING_SERVICE, &format!("{}/token", self.profile)).ok()
    }

    /// The stored token, if any.
    pub fn load(&self) -> Result<Option<SecretString>, ConfigError> {
        if let Some(entry) = self.entry() {
            if let Ok(token) = entry.get_password() {
                debug!(profile = %self.profile, "token loaded from keyring");
                return Ok(Some(SecretString::from(token)));
            }
        }

        match std::fs::read_to_string(&self.file) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    debug!(profile = %self.profile, "token loaded from file");
                    Ok(Some(SecretString::from(token.to_owned())))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist `token`, preferring the keyring.
    pub fn store(&self, token: &SecretString) -> Result<TokenLocation, ConfigError> {
        if let Some(entry) = self.entry() {
            match entry.set_password(token.expose_secret()) {
                Ok(()) => {
                    remove_if_present(&self.file)?;
                    return Ok(TokenLocation::Keyring);
                }
                Err(e) => debug!(error = %e, "keyring unavailable, using token file"),
            }
        }

        write_private(&self.file, token.expose_secret())?;
        Ok(TokenLocation::File(self.file.clone()))
    }

    /// Forget the token everywhere it may be stored.
    pub fn delete(&self) -> Result<(), ConfigError> {
        if let Some(entry) = self.entry() {
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => debug!(error = %e, "keyring delete failed"),
            }
        }
        remove_if_present(&self.file)
    }
}

fn remove_if_present(path: &Path) -> Result<(), ConfigError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Write a file readable only by the current user (on unix).
fn write_private(path: &Path, contents: &str) -> Result<(), ConfigError> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
