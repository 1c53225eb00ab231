//! Core error types.

use thiserror::Error;

/// Errors surfaced by the [`Console`](crate::Console) facade.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] flocklink_api::Error),

    /// An operation was attempted before `connect()` or after
    /// `disconnect()`.
    #[error("not connected to a backend")]
    Disconnected,

    /// Client-side validation rejected a draft before it reached the
    /// server.
    #[error("validation failed: {}", format_field_errors(.0))]
    Validation(Vec<flocklink_api::FieldError>),
}

impl CoreError {
    /// Whether retrying the same operation later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api(e) => e.is_transient(),
            Self::Disconnected | Self::Validation(_) => false,
        }
    }

    /// Whether the session token was rejected.
    pub fn is_auth_expired(&self) -> bool {
        match self {
            Self::Api(e) => e.is_auth_expired(),
            Self::Disconnected | Self::Validation(_) => false,
        }
    }
}

fn format_field_errors(errors: &[flocklink_api::FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
