//! Rotem sensor-integration endpoints (read-only).
//!
//! These back the dashboard's polling refresher: integrated farms with
//! scrape health, a controller summary, recent data points, scrape
//! logs, and forecast values. All writes happen on the backend's
//! scraper side.

use crate::ApiClient;
use crate::error::Error;
use crate::types::{
    ControllerSummaryResponse, RotemDataPointResponse, RotemFarmResponse, RotemPredictionResponse,
    ScrapeLogResponse,
};

impl ApiClient {
    pub async fn list_rotem_farms(&self) -> Result<Vec<RotemFarmResponse>, Error> {
        self.list("rotem/farms/", &[]).await
    }

    pub async fn get_rotem_summary(&self) -> Result<ControllerSummaryResponse, Error> {
        self.get("rotem/summary/").await
    }

    /// Most recent data points across all controllers.
    pub async fn list_rotem_data(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<RotemDataPointResponse>, Error> {
        let params: Vec<(&str, String)> = limit
            .map(|n| vec![("limit", n.to_string())])
            .unwrap_or_default();
        self.list("rotem/data/recent/", &params).await
    }

    /// Forecast values produced by the backend's prediction models.
    pub async fn list_rotem_predictions(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<RotemPredictionResponse>, Error> {
        let params: Vec<(&str, String)> = limit
            .map(|n| vec![("limit", n.to_string())])
            .unwrap_or_default();
        self.list("rotem/predictions/", &params).await
    }

    pub async fn list_scrape_logs(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<ScrapeLogResponse>, Error> {
        let params: Vec<(&str, String)> = limit
            .map(|n| vec![("limit", n.to_string())])
            .unwrap_or_default();
        self.list("rotem/logs/", &params).await
    }
}
