//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use flocklink_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend")]
    #[diagnostic(
        code(flocklink::connection_failed),
        help(
            "Check that the server is running and the URL is correct.\n\
             For self-signed TLS, pass --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("The session token was rejected")]
    #[diagnostic(
        code(flocklink::auth_failed),
        help(
            "The token is invalid or expired. Obtain a fresh one and set\n\
             FLOCKLINK_TOKEN, or update the profile with: flocklink config init"
        )
    )]
    AuthFailed,

    #[error("Permission denied: {message}")]
    #[diagnostic(code(flocklink::forbidden))]
    Forbidden { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource} not found")]
    #[diagnostic(
        code(flocklink::not_found),
        help("Run the matching `list` command to see what exists.")
    )]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    #[diagnostic(
        code(flocklink::conflict),
        help("The resource changed on the server. Re-list and retry.")
    )]
    Conflict { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Validation failed:\n{rendered}")]
    #[diagnostic(code(flocklink::validation))]
    Validation { rendered: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(flocklink::usage))]
    Usage { field: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Server error ({status}): {message}")]
    #[diagnostic(code(flocklink::api_error))]
    Api { status: u16, message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(flocklink::config))]
    Config(#[from] flocklink_config::ConfigError),

    #[error("No backend configured")]
    #[diagnostic(
        code(flocklink::no_config),
        help(
            "Pass --server and a token, or create a profile with: flocklink config init\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unexpected: {0}")]
    Other(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed | Self::Forbidden { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::Usage { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        use flocklink_core::ApiError;

        match err {
            CoreError::Validation(errors) => Self::Validation {
                rendered: render_field_errors(&errors),
            },
            CoreError::Disconnected => Self::Other("not connected".into()),
            CoreError::Api(api) => match api {
                ApiError::InvalidToken | ApiError::Authentication { .. } => Self::AuthFailed,
                ApiError::NotFound { resource } => Self::NotFound { resource },
                ApiError::Conflict { message } => Self::Conflict { message },
                ApiError::Validation { errors } => Self::Validation {
                    rendered: render_field_errors(&errors),
                },
                ApiError::Transport(e) => Self::ConnectionFailed {
                    source: Box::new(e),
                },
                ApiError::Server { status, message, .. } => Self::Api { status, message },
                other => Self::Other(other.to_string()),
            },
        }
    }
}

fn render_field_errors(errors: &[flocklink_core::FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}
