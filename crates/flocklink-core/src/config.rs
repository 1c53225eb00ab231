//! Console configuration.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use flocklink_api::{TlsMode, TokenScheme, TransportConfig};

/// TLS verification behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsVerification {
    /// Verify against the system certificate store.
    #[default]
    System,
    /// Verify against a custom CA certificate (PEM file).
    CustomCa(PathBuf),
    /// Skip verification entirely (self-signed backends).
    Insecure,
}

impl From<&TlsVerification> for TlsMode {
    fn from(v: &TlsVerification) -> Self {
        match v {
            TlsVerification::System => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::Insecure => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Everything a [`Console`](crate::Console) needs to reach a backend.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend root URL, e.g. `https://ops.example.farm`.
    pub server: String,
    /// Session token sent on every request.
    pub token: SecretString,
    /// Authorization header scheme.
    pub scheme: TokenScheme,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Rotem dashboard poll interval. Zero disables background polling.
    pub poll_interval: Duration,
}

impl ConsoleConfig {
    pub fn new(server: impl Into<String>, token: SecretString) -> Self {
        Self {
            server: server.into(),
            token,
            scheme: TokenScheme::default(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(30),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from(&self.tls),
            timeout: self.timeout,
        }
    }
}
