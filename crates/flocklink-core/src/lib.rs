//! Core session layer for the flocklink farm-operations console.
//!
//! [`Console`] owns one backend session end to end: it verifies the
//! token, loads every resource into a reactive [`DataStore`], keeps the
//! Rotem integration dashboard fresh with a background poller, and
//! routes mutations server-first so the cache only ever holds
//! confirmed state.
//!
//! ```no_run
//! use flocklink_core::{Console, ConsoleConfig};
//! use secrecy::SecretString;
//!
//! # async fn run() -> Result<(), flocklink_core::CoreError> {
//! let config = ConsoleConfig::new(
//!     "https://ops.example.farm",
//!     SecretString::from("api-token"),
//! );
//! let console = Console::new(config);
//! console.connect().await?;
//!
//! for farm in console.store().farms.snapshot().iter() {
//!     println!("{}", farm.name);
//! }
//!
//! console.disconnect().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod model;
pub mod store;
pub mod validate;

mod convert;
mod poller;

pub use config::{ConsoleConfig, TlsVerification};
pub use console::{Console, ConnectionState, SessionProfile};
pub use error::CoreError;
pub use store::{DataStore, Entity, ResourceStore};
pub use validate::{FarmDraft, ProgramTaskDraft, ScheduledReportDraft, WorkerDraft};

pub use flocklink_api::{Error as ApiError, FieldError, TokenScheme};
