//! Config subcommand handlers.

use dialoguer::{Confirm, Input};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, DEFAULT_API_URL, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

fn check_url(raw: &str) -> Result<String, CliError> {
    let url = pharmadesk_config::parse_api_url(raw)?;
    Ok(url.as_str().trim_end_matches('/').to_owned())
}

fn save(cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::save_config(cfg)?;
    output::success(&format!("Saved {}", path.display()), global);
    Ok(())
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let mut cfg = config::load_config()?;
            eprintln!("pharmadesk configuration");
            eprintln!("   Config path: {}\n", config::config_path().display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(config::active_profile_name(global, &cfg))
                .interact_text()
                .map_err(prompt_err)?;
            pharmadesk_config::validate_profile_name(&profile_name)?;

            let current = cfg.profiles.get(&profile_name);
            let api_url: String = Input::new()
                .with_prompt("Backend URL")
                .default(current.map_or_else(|| DEFAULT_API_URL.to_owned(), |p| p.api_url.clone()))
                .validate_with(|input: &String| {
                    pharmadesk_config::parse_api_url(input)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let email: String = Input::new()
                .with_prompt("Login e-mail (optional)")
                .default(current.and_then(|p| p.email.clone()).unwrap_or_default())
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let mut profile = current.cloned().unwrap_or_else(|| Profile::new(DEFAULT_API_URL));
            profile.api_url = check_url(&api_url)?;
            profile.email = Some(email.trim().to_owned()).filter(|e| !e.is_empty());

            if cfg.default_profile.as_deref() != Some(profile_name.as_str()) {
                let make_default = Confirm::new()
                    .with_prompt(format!("Make '{profile_name}' the default profile?"))
                    .default(true)
                    .interact()
                    .map_err(prompt_err)?;
                if make_default {
                    cfg.default_profile = Some(profile_name.clone());
                }
            }

            cfg.profiles.insert(profile_name, profile);
            save(&cfg, global)?;
            eprintln!("   Next: pharmadesk login");
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let rendered = toml::to_string_pretty(&cfg).map_err(pharmadesk_config::ConfigError::from)?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetUrl { url } => {
            let mut cfg = config::load_config()?;
            let name = config::active_profile_name(global, &cfg);
            pharmadesk_config::validate_profile_name(&name)?;
            let url = check_url(&url)?;
            cfg.profiles
                .entry(name.clone())
                .and_modify(|p| p.api_url.clone_from(&url))
                .or_insert_with(|| Profile::new(url.clone()));
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(name.clone());
            }
            save(&cfg, global)?;
            output::success(&format!("Profile '{name}' now uses {url}"), global);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let active = config::active_profile_name(global, &cfg);
            let lines: Vec<String> = cfg
                .profiles
                .iter()
                .map(|(name, p)| {
                    let marker = if *name == active { "*" } else { " " };
                    format!("{marker} {name}  {}", p.api_url)
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                let available: Vec<_> = cfg.profiles.keys().map(String::as_str).collect();
                return Err(CliError::Validation {
                    field: "profile".into(),
                    reason: format!(
                        "'{name}' not found (available: {})",
                        if available.is_empty() { "none".to_owned() } else { available.join(", ") }
                    ),
                });
            }
            cfg.default_profile = Some(name.clone());
            save(&cfg, global)?;
            output::success(&format!("Default profile is now '{name}'"), global);
            Ok(())
        }
    }
}
