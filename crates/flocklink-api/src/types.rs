// Wire DTOs for the farm-operations backend.
//
// Field names follow the backend's snake_case JSON. Optional fields
// default so partially-populated responses still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

// ── Farms ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct FarmResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    /// `"none"` or `"rotem"`.
    #[serde(default)]
    pub integration_type: Option<String>,
    #[serde(default)]
    pub integration_status: Option<String>,
    #[serde(default)]
    pub house_count: Option<u32>,
    #[serde(default)]
    pub worker_count: Option<u32>,
}

/// Create/update payload for a farm.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FarmWrite {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_type: Option<String>,
}

// ── Workers ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerResponse {
    pub id: i64,
    pub farm: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-text role ("manager", "feeder", ...).
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub receive_daily_tasks: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkerWrite {
    pub farm: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive_daily_tasks: Option<bool>,
}

// ── Programs ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tasks: Vec<ProgramTaskResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramTaskResponse {
    pub id: i64,
    /// Days after flock placement when the task is due.
    pub day_offset: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `"low"`, `"medium"`, `"high"`, `"critical"`.
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub recurring: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProgramWrite {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgramTaskWrite {
    pub program: i64,
    pub day_offset: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
}

// ── Rotem integration ────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RotemFarmResponse {
    /// The linked farm's id.
    pub farm_id: i64,
    /// Controller gateway name -- the stable key on the Rotem side.
    pub gateway_name: String,
    #[serde(default)]
    pub scrape_status: Option<String>,
    #[serde(default)]
    pub last_scrape: Option<DateTime<Utc>>,
    /// Fraction of successful scrapes over the health window (0.0-1.0).
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub consecutive_failures: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RotemDataPointResponse {
    pub farm_id: i64,
    pub controller: String,
    pub metric: String,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RotemPredictionResponse {
    pub farm_id: i64,
    pub controller: String,
    pub metric: String,
    pub predicted_value: f64,
    pub predicted_for: DateTime<Utc>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeLogResponse {
    pub id: i64,
    pub farm_id: i64,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControllerSummaryResponse {
    pub total_farms: u32,
    pub active_controllers: u32,
    pub failing_controllers: u32,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

// ── Reports ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ReportTemplateResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metrics: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledReportResponse {
    pub id: i64,
    pub template: i64,
    /// `"daily"`, `"weekly"`, `"monthly"`.
    pub frequency: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduledReportWrite {
    pub template: i64,
    pub frequency: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportExecutionResponse {
    pub id: i64,
    pub scheduled_report: i64,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    /// `"pending"`, `"running"`, `"succeeded"`, `"failed"`.
    pub status: String,
    #[serde(default)]
    pub detail: Option<String>,
}

fn default_true() -> bool {
    true
}
