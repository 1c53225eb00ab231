//! Shared configuration for flocklink tools.
//!
//! A TOML config file holds named profiles, each describing one backend.
//! Values can be overridden through `FLOCKLINK_`-prefixed environment
//! variables; the session token itself is usually *not* stored in the
//! file but provided via `FLOCKLINK_TOKEN`.
//!
//! ```toml
//! default_profile = "prod"
//!
//! [defaults]
//! timeout_secs = 30
//! poll_interval_secs = 30
//!
//! [profiles.prod]
//! server = "https://ops.example.farm"
//! scheme = "token"
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use flocklink_core::TokenScheme;

/// Environment variable checked before the profile's stored token.
pub const TOKEN_ENV_VAR: &str = "FLOCKLINK_TOKEN";

// ── Types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

/// Fallbacks applied to every profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    pub timeout_secs: u64,
    /// Zero disables background polling.
    pub poll_interval_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            poll_interval_secs: 30,
        }
    }
}

/// One backend connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Backend root URL, e.g. `https://ops.example.farm`.
    pub server: String,

    /// Session token. Prefer `FLOCKLINK_TOKEN` over storing it here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// `"token"` (default) or `"bearer"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Custom CA certificate (PEM) for self-hosted backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,
}

// ── Errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("failed to write config: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no config directory available on this platform")]
    NoConfigDir,

    #[error("profile '{0}' not found in config")]
    UnknownProfile(String),

    #[error("no token for profile '{profile}': set {TOKEN_ENV_VAR} or add `token` to the profile")]
    MissingToken { profile: String },

    #[error("profile '{profile}': expected scheme 'token' or 'bearer', got '{value}'")]
    InvalidScheme { profile: String, value: String },
}

// ── Loading & saving ─────────────────────────────────────────────────

/// Default config file location (`~/.config/flocklink/config.toml` on
/// Linux, platform-appropriate elsewhere).
pub fn config_path() -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("", "", "flocklink")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Load config from the given file, layering `FLOCKLINK_` environment
/// variables on top. A missing file yields the defaults.
pub fn load_config(path: &std::path::Path) -> Result<Config, ConfigError> {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("FLOCKLINK_").ignore(&["token"]).split("__"))
        .extract()
        .map_err(|e| ConfigError::Load(Box::new(e)))
}

/// Load from the default location, falling back to defaults when no
/// config directory exists.
pub fn load_config_or_default() -> Result<Config, ConfigError> {
    match config_path() {
        Ok(path) => load_config(&path),
        Err(ConfigError::NoConfigDir) => Ok(Config::default()),
        Err(e) => Err(e),
    }
}

/// Write the config to the given file, creating parent directories.
pub fn save_config(config: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let rendered = toml::to_string_pretty(config)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

// ── Resolution helpers ───────────────────────────────────────────────

impl Config {
    /// Look up a profile by name, or the default profile when `name` is
    /// `None`.
    pub fn resolve_profile<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get(name)
            .map(|p| (name, p))
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_owned()))
    }
}

/// Resolve the session token: `FLOCKLINK_TOKEN` wins over the value
/// stored in the profile.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
        && !token.is_empty()
    {
        return Ok(SecretString::from(token));
    }
    profile
        .token
        .clone()
        .filter(|t| !t.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingToken {
            profile: profile_name.to_owned(),
        })
}

/// Parse the profile's `scheme` field.
pub fn resolve_scheme(profile: &Profile, profile_name: &str) -> Result<TokenScheme, ConfigError> {
    match profile.scheme.as_deref() {
        None | Some("token") => Ok(TokenScheme::Token),
        Some("bearer") => Ok(TokenScheme::Bearer),
        Some(other) => Err(ConfigError::InvalidScheme {
            profile: profile_name.to_owned(),
            value: other.to_owned(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_profiles_from_toml() {
        let file = write_config(
            r#"
            default_profile = "prod"

            [profiles.prod]
            server = "https://ops.example.farm"
            scheme = "bearer"

            [profiles.lab]
            server = "http://localhost:8000"
            token = "lab-token"
            insecure = true
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("prod"));
        assert_eq!(config.profiles.len(), 2);

        let (name, profile) = config.resolve_profile(None).unwrap();
        assert_eq!(name, "prod");
        assert_eq!(profile.server, "https://ops.example.farm");

        let (_, lab) = config.resolve_profile(Some("lab")).unwrap();
        assert_eq!(lab.insecure, Some(true));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config(std::path::Path::new("/nonexistent/flocklink.toml")).unwrap();
        assert!(config.profiles.is_empty());
        assert_eq!(config.defaults.timeout_secs, 30);
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let config = Config::default();
        let err = config.resolve_profile(Some("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile(name) if name == "nope"));
    }

    #[test]
    fn token_from_profile_when_env_unset() {
        let profile = Profile {
            token: Some("file-token".into()),
            ..Default::default()
        };
        // Serial-safe: only reads the env var, never sets it.
        if std::env::var(TOKEN_ENV_VAR).is_err() {
            let token = resolve_token(&profile, "lab").unwrap();
            assert_eq!(secrecy::ExposeSecret::expose_secret(&token), "file-token");
        }
    }

    #[test]
    fn missing_token_names_the_profile() {
        if std::env::var(TOKEN_ENV_VAR).is_ok() {
            return;
        }
        let err = resolve_token(&Profile::default(), "prod").unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken { profile } if profile == "prod"));
    }

    #[test]
    fn scheme_parses_or_rejects() {
        let mut profile = Profile::default();
        assert_eq!(
            resolve_scheme(&profile, "p").unwrap(),
            TokenScheme::Token
        );

        profile.scheme = Some("bearer".into());
        assert_eq!(
            resolve_scheme(&profile, "p").unwrap(),
            TokenScheme::Bearer
        );

        profile.scheme = Some("basic".into());
        assert!(matches!(
            resolve_scheme(&profile, "p"),
            Err(ConfigError::InvalidScheme { .. })
        ));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.default_profile = Some("prod".into());
        config.profiles.insert(
            "prod".into(),
            Profile {
                server: "https://ops.example.farm".into(),
                ..Default::default()
            },
        );

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("prod"));
        assert_eq!(loaded.profiles["prod"].server, "https://ops.example.farm");
    }
}
