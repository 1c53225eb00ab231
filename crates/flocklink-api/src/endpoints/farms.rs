//! Farm endpoints.

use crate::ApiClient;
use crate::error::Error;
use crate::types::{FarmResponse, FarmWrite};

impl ApiClient {
    /// List farms, following pagination to exhaustion.
    ///
    /// `search` filters by name/location server-side.
    pub async fn list_farms(&self, search: Option<&str>) -> Result<Vec<FarmResponse>, Error> {
        let params: Vec<(&str, String)> = search
            .map(|s| vec![("search", s.to_owned())])
            .unwrap_or_default();
        self.list_all("farms/", &params).await
    }

    pub async fn get_farm(&self, id: i64) -> Result<FarmResponse, Error> {
        self.get(&format!("farms/{id}/")).await
    }

    pub async fn create_farm(&self, body: &FarmWrite) -> Result<FarmResponse, Error> {
        self.post("farms/", body).await
    }

    pub async fn update_farm(&self, id: i64, body: &FarmWrite) -> Result<FarmResponse, Error> {
        self.put(&format!("farms/{id}/"), body).await
    }

    pub async fn delete_farm(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("farms/{id}/")).await
    }
}
