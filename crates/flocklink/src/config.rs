//! CLI configuration -- thin wrapper around `flocklink_config` shared
//! types, adding resolution that respects `GlobalOpts` flag overrides.

use std::time::Duration;

use secrecy::SecretString;

use flocklink_core::{ConsoleConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use flocklink_config::{
    Config, Profile, config_path, load_config_or_default, resolve_scheme, resolve_token,
    save_config,
};

/// Build a `ConsoleConfig` from the config file, active profile, and
/// CLI flag overrides. Flags beat the profile, the profile beats
/// `[defaults]`.
pub fn build_console_config(
    global: &GlobalOpts,
    poll_interval: Duration,
) -> Result<ConsoleConfig, CliError> {
    let config = load_config_or_default()?;

    // A --server flag (or env) makes the profile optional.
    let resolved = config.resolve_profile(global.profile.as_deref());
    let (profile_name, profile) = match (&resolved, &global.server) {
        (Ok((name, profile)), _) => ((*name).to_owned(), (*profile).clone()),
        (Err(_), Some(_)) => ("default".to_owned(), Profile::default()),
        (Err(_), None) => {
            return Err(CliError::NoConfig {
                path: config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "<unavailable>".into()),
            });
        }
    };

    let server = global
        .server
        .clone()
        .or_else(|| (!profile.server.is_empty()).then(|| profile.server.clone()))
        .ok_or_else(|| CliError::Usage {
            field: "server".into(),
            reason: format!("profile '{profile_name}' has no server URL"),
        })?;

    let token = match &global.token {
        Some(t) => SecretString::from(t.clone()),
        None => resolve_token(&profile, &profile_name)?,
    };

    let scheme = resolve_scheme(&profile, &profile_name)?;

    let tls = if global.insecure || profile.insecure.unwrap_or(false) {
        TlsVerification::Insecure
    } else if let Some(ca) = &profile.ca_cert {
        TlsVerification::CustomCa(ca.clone())
    } else {
        TlsVerification::System
    };

    let timeout_secs = global
        .timeout
        .or(profile.timeout_secs)
        .unwrap_or(config.defaults.timeout_secs);

    let mut console = ConsoleConfig::new(server, token);
    console.scheme = scheme;
    console.tls = tls;
    console.timeout = Duration::from_secs(timeout_secs);
    console.poll_interval = poll_interval;
    Ok(console)
}
