use thiserror::Error;

/// A single field-level validation failure from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Top-level error type for the `flocklink-api` crate.
///
/// Transport failures and non-2xx responses are mapped into this closed
/// taxonomy centrally in [`ApiClient`](crate::ApiClient) -- call sites
/// never invent their own error strings. `flocklink-core` maps these into
/// store-level messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend rejected the request for auth reasons other than a
    /// bad token (e.g. insufficient permissions).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The session token was rejected (HTTP 401).
    #[error("Invalid or expired API token")]
    InvalidToken,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or handshake error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API responses ───────────────────────────────────────────────
    /// The requested resource does not exist (HTTP 404).
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// The server detected a write conflict (HTTP 409/412).
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The server rejected the payload with field-level errors (HTTP 400).
    #[error("Validation failed: {}", format_fields(.errors))]
    Validation { errors: Vec<FieldError> },

    /// Any other non-2xx response, with the structured payload if present.
    #[error("Server error (HTTP {status}): {message}")]
    Server {
        status: u16,
        message: String,
        code: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Returns `true` if re-authenticating (a fresh token) might resolve this.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::InvalidToken | Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient failure worth a manual retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Server { status, .. } => matches!(status, 502 | 503 | 504),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Extract the backend error code, if the payload carried one.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Server { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_fields() {
        let err = Error::Validation {
            errors: vec![
                FieldError {
                    field: "email".into(),
                    message: "invalid email address".into(),
                },
                FieldError {
                    field: "phone".into(),
                    message: "too short".into(),
                },
            ],
        };
        let text = err.to_string();
        assert!(text.contains("email: invalid email address"));
        assert!(text.contains("phone: too short"));
    }

    #[test]
    fn gateway_errors_are_transient() {
        let err = Error::Server {
            status: 503,
            message: "unavailable".into(),
            code: None,
        };
        assert!(err.is_transient());

        let err = Error::Server {
            status: 500,
            message: "boom".into(),
            code: None,
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn not_found_predicate() {
        let err = Error::NotFound {
            resource: "farms/9".into(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_auth_expired());
    }
}
