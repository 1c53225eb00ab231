// ── Rotem sensor-integration domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A farm linked to the external Rotem controller system, with the
/// scrape health the dashboard polls for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotemFarm {
    pub farm_id: EntityId,
    /// Controller gateway name -- the stable key on the Rotem side.
    pub gateway_name: String,
    pub scrape_status: Option<String>,
    pub last_scrape: Option<DateTime<Utc>>,
    /// Fraction of successful scrapes over the health window (0.0-1.0).
    pub success_rate: Option<f64>,
    pub consecutive_failures: u32,
}

impl RotemFarm {
    /// A controller is considered failing after three straight misses.
    pub fn is_failing(&self) -> bool {
        self.consecutive_failures >= 3
    }
}

/// One sensor reading from a controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotemDataPoint {
    pub farm_id: EntityId,
    pub controller: String,
    pub metric: String,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}

/// A forecast value for one controller metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotemPrediction {
    pub farm_id: EntityId,
    pub controller: String,
    pub metric: String,
    pub predicted_value: f64,
    pub predicted_for: DateTime<Utc>,
    /// Model confidence (0.0-1.0), when the backend provides one.
    pub confidence: Option<f64>,
}

/// One scrape attempt against a controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeLog {
    pub id: EntityId,
    pub farm_id: EntityId,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub success: bool,
    pub message: Option<String>,
}

/// Fleet-wide integration health, rendered on the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerSummary {
    pub total_farms: u32,
    pub active_controllers: u32,
    pub failing_controllers: u32,
    pub last_updated: Option<DateTime<Utc>>,
}
