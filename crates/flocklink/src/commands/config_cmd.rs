//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Confirm, Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

/// Format config for display, masking stored tokens.
fn format_config_redacted(config: &Config) -> String {
    let mut out = String::new();

    if let Some(default) = &config.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "timeout_secs = {}", config.defaults.timeout_secs);
    let _ = writeln!(out, "poll_interval_secs = {}", config.defaults.poll_interval_secs);

    for (name, profile) in &config.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "server = \"{}\"", profile.server);
        if profile.token.is_some() {
            let _ = writeln!(out, "token = \"****\"");
        }
        if let Some(scheme) = &profile.scheme {
            let _ = writeln!(out, "scheme = \"{scheme}\"");
        }
        if let Some(insecure) = profile.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(ca) = &profile.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(timeout) = profile.timeout_secs {
            let _ = writeln!(out, "timeout_secs = {timeout}");
        }
        if let Some(poll) = profile.poll_interval_secs {
            let _ = writeln!(out, "poll_interval_secs = {poll}");
        }
    }

    out.truncate(out.trim_end().len());
    out
}

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Usage {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Interactively create or update a profile.
fn init_profile(config: &mut Config) -> Result<String, CliError> {
    let name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let existing = config.profiles.get(&name).cloned().unwrap_or_default();

    let server: String = Input::new()
        .with_prompt("Backend URL")
        .with_initial_text(existing.server.clone())
        .interact_text()
        .map_err(prompt_err)?;

    let schemes = ["token", "bearer"];
    let scheme_idx = Select::new()
        .with_prompt("Authorization scheme")
        .items(&schemes)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let store_token = Confirm::new()
        .with_prompt("Store the token in the config file? (FLOCKLINK_TOKEN is preferred)")
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    let token = if store_token {
        let raw: String = Input::new()
            .with_prompt("Session token")
            .interact_text()
            .map_err(prompt_err)?;
        Some(raw)
    } else {
        existing.token
    };

    config.profiles.insert(
        name.clone(),
        Profile {
            server,
            token,
            scheme: Some(schemes[scheme_idx].to_owned()),
            ..existing
        },
    );
    if config.default_profile.is_none() {
        config.default_profile = Some(name.clone());
    }
    Ok(name)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let config = config::load_config_or_default()?;
            output::print_output(&format_config_redacted(&config), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            let path = config::config_path()?;
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init => {
            let mut config = config::load_config_or_default()?;
            let name = init_profile(&mut config)?;
            let path = config::config_path()?;
            config::save_config(&config, &path)?;
            if !global.quiet {
                eprintln!("Profile '{name}' saved to {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::UseProfile { name } => {
            let mut config = config::load_config_or_default()?;
            if !config.profiles.contains_key(&name) {
                return Err(CliError::Config(
                    flocklink_config::ConfigError::UnknownProfile(name),
                ));
            }
            config.default_profile = Some(name.clone());
            let path = config::config_path()?;
            config::save_config(&config, &path)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}
