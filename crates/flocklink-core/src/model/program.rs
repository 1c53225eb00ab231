// ── Task-program domain types ──
//
// Programs are scheduling templates: a list of tasks at day offsets
// relative to flock placement.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::EntityId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub tasks: Vec<ProgramTask>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramTask {
    pub id: EntityId,
    /// Days after flock placement when the task is due.
    pub day_offset: i32,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub recurring: bool,
}
