// ── Farm domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::EntityId;

/// Which external sensor system a farm is linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IntegrationType {
    #[default]
    None,
    Rotem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: EntityId,
    pub name: String,
    pub location: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub integration: IntegrationType,
    /// Raw integration status string from the backend ("linked",
    /// "pending", ...). Only meaningful when `integration != None`.
    pub integration_status: Option<String>,
    pub house_count: Option<u32>,
    pub worker_count: Option<u32>,
}
