//! Async HTTP client for the flocklink farm-operations REST backend.
//!
//! The backend is a conventional JSON REST server: resource collections
//! under `/api/`, token-authenticated via the `Authorization` header,
//! list endpoints returning either a flat JSON array or a paginated
//! `{ "results": [...] }` envelope. This crate owns the transport
//! mechanics and the error taxonomy; domain logic lives in
//! `flocklink-core`.
//!
//! - **[`ApiClient`]** -- request verbs, central status-to-error mapping,
//!   and one shared list-normalization rule ([`ListEnvelope`]).
//! - **[`TransportConfig`]** -- TLS mode and explicit request timeouts.
//! - **[`Error`]** -- closed failure taxonomy (`Transport`, `InvalidToken`,
//!   `NotFound`, `Conflict`, `Validation`, `Server`, ...).
//! - **Endpoint modules** -- typed per-resource methods (farms, workers,
//!   programs, rotem integration, reports, session).

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

pub use auth::TokenScheme;
pub use client::{ApiClient, ListEnvelope};
pub use error::{Error, FieldError};
pub use transport::{TlsMode, TransportConfig};
