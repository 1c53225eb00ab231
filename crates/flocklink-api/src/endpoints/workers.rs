//! Worker endpoints.

use crate::ApiClient;
use crate::error::Error;
use crate::types::{WorkerResponse, WorkerWrite};

impl ApiClient {
    /// List workers, optionally scoped to one farm.
    pub async fn list_workers(&self, farm_id: Option<i64>) -> Result<Vec<WorkerResponse>, Error> {
        let params: Vec<(&str, String)> = farm_id
            .map(|id| vec![("farm", id.to_string())])
            .unwrap_or_default();
        self.list_all("workers/", &params).await
    }

    pub async fn get_worker(&self, id: i64) -> Result<WorkerResponse, Error> {
        self.get(&format!("workers/{id}/")).await
    }

    pub async fn create_worker(&self, body: &WorkerWrite) -> Result<WorkerResponse, Error> {
        self.post("workers/", body).await
    }

    pub async fn update_worker(&self, id: i64, body: &WorkerWrite) -> Result<WorkerResponse, Error> {
        self.put(&format!("workers/{id}/"), body).await
    }

    pub async fn delete_worker(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("workers/{id}/")).await
    }
}
