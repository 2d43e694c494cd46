//! CLI configuration: thin wrapper around `pharmadesk_config`.
//!
//! Adds flag-aware resolution on top of the shared profile types:
//! `--api-url` / `--insecure` / `--timeout` beat the profile, which beats
//! the built-in defaults.

use pharmadesk_core::ConsoleConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use pharmadesk_config::{
    Config, DEFAULT_API_URL, Profile, TokenLocation, TokenStore, config_path, load_config, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build a `ConsoleConfig` for `profile_name`, applying flag overrides.
///
/// A missing profile is not an error: the backend URL then comes from the
/// flag or falls back to `DEFAULT_API_URL`.
pub fn resolve_console_config(
    global: &GlobalOpts,
    config: &Config,
    profile_name: &str,
) -> Result<ConsoleConfig, CliError> {
    let mut profile = config
        .profiles
        .get(profile_name)
        .cloned()
        .unwrap_or_else(|| Profile::new(DEFAULT_API_URL));

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    Ok(pharmadesk_config::profile_to_console_config(
        &profile,
        &config.defaults,
    )?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use pharmadesk_core::TlsVerification;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["pharmadesk"];
        argv.extend_from_slice(args);
        argv.push("logout");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_staging() -> Config {
        let mut cfg = Config::default();
        let mut staging = Profile::new("https://staging.example.org");
        staging.timeout = Some(5);
        cfg.profiles.insert("staging".into(), staging);
        cfg
    }

    #[test]
    fn no_profile_falls_back_to_default_url() {
        let cfg = Config::default();
        let resolved = resolve_console_config(&global(&[]), &cfg, "default").unwrap();
        assert_eq!(resolved.api_url.as_str(), "http://localhost:5000/");
        assert_eq!(resolved.timeout, Duration::from_secs(30));
    }

    #[test]
    fn profile_values_apply() {
        let cfg = config_with_staging();
        let g = global(&["--profile", "staging"]);
        let name = active_profile_name(&g, &cfg);
        let resolved = resolve_console_config(&g, &cfg, &name).unwrap();
        assert_eq!(resolved.api_url.as_str(), "https://staging.example.org/");
        assert_eq!(resolved.timeout, Duration::from_secs(5));
        assert_eq!(resolved.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with_staging();
        let g = global(&[
            "--profile",
            "staging",
            "--api-url",
            "http://10.0.0.2:5000",
            "--timeout",
            "60",
            "--insecure",
        ]);
        let resolved = resolve_console_config(&g, &cfg, "staging").unwrap();
        assert_eq!(resolved.api_url.as_str(), "http://10.0.0.2:5000/");
        assert_eq!(resolved.timeout, Duration::from_secs(60));
        assert_eq!(resolved.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn bad_url_is_a_config_error() {
        let cfg = Config::default();
        let err = resolve_console_config(&global(&["--api-url", "ftp://x"]), &cfg, "default")
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }
}
