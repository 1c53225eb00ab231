//! Task-program endpoints.

use crate::ApiClient;
use crate::error::Error;
use crate::types::{ProgramResponse, ProgramTaskResponse, ProgramTaskWrite, ProgramWrite};

impl ApiClient {
    pub async fn list_programs(&self) -> Result<Vec<ProgramResponse>, Error> {
        self.list_all("programs/", &[]).await
    }

    pub async fn get_program(&self, id: i64) -> Result<ProgramResponse, Error> {
        self.get(&format!("programs/{id}/")).await
    }

    pub async fn create_program(&self, body: &ProgramWrite) -> Result<ProgramResponse, Error> {
        self.post("programs/", body).await
    }

    pub async fn update_program(
        &self,
        id: i64,
        body: &ProgramWrite,
    ) -> Result<ProgramResponse, Error> {
        self.put(&format!("programs/{id}/"), body).await
    }

    pub async fn delete_program(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("programs/{id}/")).await
    }

    // ── Nested tasks ─────────────────────────────────────────────────

    pub async fn create_program_task(
        &self,
        body: &ProgramTaskWrite,
    ) -> Result<ProgramTaskResponse, Error> {
        self.post("program-tasks/", body).await
    }

    pub async fn delete_program_task(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("program-tasks/{id}/")).await
    }
}
