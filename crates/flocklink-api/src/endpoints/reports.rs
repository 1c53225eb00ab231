//! Reporting endpoints: templates, schedules, and run history.

use crate::ApiClient;
use crate::error::Error;
use crate::types::{
    ReportExecutionResponse, ReportTemplateResponse, ScheduledReportResponse, ScheduledReportWrite,
};

impl ApiClient {
    pub async fn list_report_templates(&self) -> Result<Vec<ReportTemplateResponse>, Error> {
        self.list_all("reports/templates/", &[]).await
    }

    pub async fn list_scheduled_reports(&self) -> Result<Vec<ScheduledReportResponse>, Error> {
        self.list_all("reports/scheduled/", &[]).await
    }

    pub async fn create_scheduled_report(
        &self,
        body: &ScheduledReportWrite,
    ) -> Result<ScheduledReportResponse, Error> {
        self.post("reports/scheduled/", body).await
    }

    pub async fn update_scheduled_report(
        &self,
        id: i64,
        body: &ScheduledReportWrite,
    ) -> Result<ScheduledReportResponse, Error> {
        self.put(&format!("reports/scheduled/{id}/"), body).await
    }

    pub async fn delete_scheduled_report(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("reports/scheduled/{id}/")).await
    }

    /// Run history, newest first.
    pub async fn list_report_executions(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<ReportExecutionResponse>, Error> {
        let params: Vec<(&str, String)> = limit
            .map(|n| vec![("limit", n.to_string())])
            .unwrap_or_default();
        self.list("reports/executions/", &params).await
    }
}
