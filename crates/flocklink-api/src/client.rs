// Hand-crafted async HTTP client for the farm-operations REST backend.
//
// Base path: /api/
// Auth: Authorization header (Token or Bearer scheme)

use reqwest::StatusCode;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::{TokenScheme, auth_headers};
use crate::error::{Error, FieldError};
use crate::transport::TransportConfig;

// ── List normalization ───────────────────────────────────────────────

/// The two list-response shapes the backend produces.
///
/// Plain endpoints return a flat JSON array; paginated endpoints wrap it
/// as `{ "count": N, "next": url, "results": [...] }`. Every list call
/// site decodes through this one rule -- nothing guesses per-call.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Paginated {
        results: Vec<T>,
        #[serde(default)]
        count: Option<i64>,
        #[serde(default)]
        next: Option<String>,
    },
    Flat(Vec<T>),
}

impl<T> ListEnvelope<T> {
    /// The items of this page, envelope stripped.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Flat(items) | Self::Paginated { results: items, .. } => items,
        }
    }

    /// The absolute URL of the next page, if paginated and not exhausted.
    fn next_url(&self) -> Option<&str> {
        match self {
            Self::Paginated { next, .. } => next.as_deref(),
            Self::Flat(_) => None,
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the flocklink backend.
///
/// Attaches the session token on every request, normalizes list shapes,
/// and maps every failure into the [`Error`] taxonomy.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a server URL and session token.
    ///
    /// `server` is the backend root (e.g. `https://ops.example.farm`);
    /// the `/api/` base path is appended if not already present.
    pub fn from_token(
        server: &str,
        token: &SecretString,
        scheme: TokenScheme,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let headers = auth_headers(token, scheme)?;
        let http = transport.build_client(headers)?;
        let base_url = Self::normalize_base_url(server)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(server: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(server)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with `/api/` so relative joins work.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }
        Ok(url)
    }

    /// Join a relative path (e.g. `"farms/"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(path, resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(path, resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(path, resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(path, resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(path, resp).await
    }

    // ── List helpers ─────────────────────────────────────────────────

    /// Fetch one list response and strip the envelope.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let envelope: ListEnvelope<T> = if params.is_empty() {
            self.get(path).await?
        } else {
            self.get_with_params(path, params).await?
        };
        Ok(envelope.into_items())
    }

    /// Fetch a list and follow `next` links until exhausted.
    pub(crate) async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let mut envelope: ListEnvelope<T> = if params.is_empty() {
            self.get(path).await?
        } else {
            self.get_with_params(path, params).await?
        };

        let mut all = Vec::new();
        loop {
            let next = envelope.next_url().map(str::to_owned);
            all.extend(envelope.into_items());

            let Some(next) = next else { break };
            let url = Url::parse(&next)?;
            debug!("GET {url} (next page)");
            let resp = self.http.get(url).send().await?;
            envelope = self.handle_response(path, resp).await?;
        }

        Ok(all)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(path, status, resp).await)
        }
    }

    async fn handle_empty(&self, path: &str, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(path, status, resp).await)
        }
    }

    /// Map a non-2xx response into the error taxonomy.
    ///
    /// 401 → `InvalidToken`, 403 → `Authentication`, 404 → `NotFound`,
    /// 409/412 → `Conflict`, 400 with field payload → `Validation`,
    /// everything else → `Server` with whatever message the payload has.
    async fn parse_error(path: &str, status: StatusCode, resp: reqwest::Response) -> Error {
        if status == StatusCode::UNAUTHORIZED {
            return Error::InvalidToken;
        }
        if status == StatusCode::NOT_FOUND {
            return Error::NotFound {
                resource: path.trim_end_matches('/').to_owned(),
            };
        }

        let raw = resp.text().await.unwrap_or_default();
        let payload: Option<Value> = serde_json::from_str(&raw).ok();

        let detail = payload
            .as_ref()
            .and_then(|v| v.get("detail"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        if status == StatusCode::FORBIDDEN {
            return Error::Authentication {
                message: detail.unwrap_or_else(|| "insufficient permissions".into()),
            };
        }

        if status == StatusCode::CONFLICT || status == StatusCode::PRECONDITION_FAILED {
            return Error::Conflict {
                message: detail.unwrap_or_else(|| status.to_string()),
            };
        }

        if status == StatusCode::BAD_REQUEST {
            if let Some(errors) = payload.as_ref().and_then(field_errors) {
                return Error::Validation { errors };
            }
        }

        let code = payload
            .as_ref()
            .and_then(|v| v.get("code"))
            .and_then(Value::as_str)
            .map(str::to_owned);
        let message = detail.unwrap_or_else(|| {
            if raw.is_empty() {
                status.to_string()
            } else {
                raw.chars().take(200).collect()
            }
        });

        Error::Server {
            status: status.as_u16(),
            message,
            code,
        }
    }
}

/// Extract DRF-style field errors: `{ "name": ["msg", ...], ... }`.
///
/// Keys carrying non-list values (`detail`, `code`) are ignored.
fn field_errors(payload: &Value) -> Option<Vec<FieldError>> {
    let map = payload.as_object()?;
    let errors: Vec<FieldError> = map
        .iter()
        .filter_map(|(field, messages)| {
            let list = messages.as_array()?;
            let message = list
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; ");
            Some(FieldError {
                field: field.clone(),
                message,
            })
        })
        .collect();

    if errors.is_empty() { None } else { Some(errors) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_api_suffix() {
        let url = ApiClient::normalize_base_url("https://ops.example.farm").unwrap();
        assert_eq!(url.as_str(), "https://ops.example.farm/api/");
    }

    #[test]
    fn base_url_keeps_existing_api_path() {
        let url = ApiClient::normalize_base_url("https://ops.example.farm/api/").unwrap();
        assert_eq!(url.as_str(), "https://ops.example.farm/api/");
    }

    #[test]
    fn envelope_accepts_flat_array() {
        let envelope: ListEnvelope<i32> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(envelope.into_items(), vec![1, 2, 3]);
    }

    #[test]
    fn envelope_accepts_paginated_shape() {
        let envelope: ListEnvelope<i32> =
            serde_json::from_str(r#"{"count": 3, "next": null, "results": [1, 2, 3]}"#).unwrap();
        assert!(envelope.next_url().is_none());
        assert_eq!(envelope.into_items(), vec![1, 2, 3]);
    }

    #[test]
    fn field_errors_skip_scalar_values() {
        let payload = serde_json::json!({
            "detail": "ignored",
            "email": ["enter a valid email address"],
        });
        let errors = field_errors(&payload).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }
}
