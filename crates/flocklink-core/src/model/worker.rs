// ── Worker domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: EntityId,
    /// The employing farm. Not validated against the farm cache.
    pub farm_id: EntityId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Free-text role as entered by the operator.
    pub role: Option<String>,
    pub is_active: bool,
    /// Whether this worker receives the daily task digest.
    pub receive_daily_tasks: bool,
}
