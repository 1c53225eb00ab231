// Authorization header construction.
//
// The backend authenticates every request with a long-lived token sourced
// from the operator's persisted session. Two header schemes exist in the
// wild: DRF-style `Token <key>` and JWT-style `Bearer <key>`.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Which `Authorization` scheme to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenScheme {
    /// `Authorization: Token <key>` -- the backend's default session tokens.
    #[default]
    Token,
    /// `Authorization: Bearer <key>` -- JWT deployments.
    Bearer,
}

impl TokenScheme {
    fn prefix(self) -> &'static str {
        match self {
            Self::Token => "Token",
            Self::Bearer => "Bearer",
        }
    }
}

/// Build a header map carrying the auth token, marked sensitive so it
/// never shows up in debug logs.
pub(crate) fn auth_headers(token: &SecretString, scheme: TokenScheme) -> Result<HeaderMap, Error> {
    let raw = format!("{} {}", scheme.prefix(), token.expose_secret());
    let mut value = HeaderValue::from_str(&raw).map_err(|e| Error::Authentication {
        message: format!("invalid token header value: {e}"),
    })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(reqwest::header::AUTHORIZATION, value);
    Ok(headers)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn token_scheme_prefixes() {
        assert_eq!(TokenScheme::Token.prefix(), "Token");
        assert_eq!(TokenScheme::Bearer.prefix(), "Bearer");
    }

    #[test]
    fn auth_header_is_sensitive() {
        let token: SecretString = "abc123".to_string().into();
        let headers = auth_headers(&token, TokenScheme::Token).unwrap();
        let value = headers.get(reqwest::header::AUTHORIZATION).unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "Token abc123");
    }

    #[test]
    fn rejects_control_characters_in_token() {
        let token: SecretString = "bad\ntoken".to_string().into();
        assert!(auth_headers(&token, TokenScheme::Bearer).is_err());
    }
}
