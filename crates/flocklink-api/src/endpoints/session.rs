//! Session endpoints.

use crate::ApiClient;
use crate::error::Error;
use crate::types::ProfileResponse;

impl ApiClient {
    /// Fetch the profile behind the current token.
    ///
    /// Used by `Console::connect()` as a cheap token check before any
    /// background task starts.
    pub async fn whoami(&self) -> Result<ProfileResponse, Error> {
        self.get("users/me/").await
    }
}
