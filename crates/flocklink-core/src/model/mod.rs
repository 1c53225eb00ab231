//! Canonical domain types.
//!
//! Value objects mirrored from server responses. The server owns
//! authoritative state; these are cached copies, replaced wholesale on
//! update and removed on delete acknowledgment. No cross-entity
//! referential integrity is maintained client-side -- deleting a farm
//! does not cascade to cached workers.

pub mod entity_id;
pub mod farm;
pub mod program;
pub mod report;
pub mod rotem;
pub mod worker;

pub use entity_id::EntityId;
pub use farm::{Farm, IntegrationType};
pub use program::{Program, ProgramTask, TaskPriority};
pub use report::{ExecutionStatus, ReportExecution, ReportFrequency, ReportTemplate, ScheduledReport};
pub use rotem::{ControllerSummary, RotemDataPoint, RotemFarm, RotemPrediction, ScrapeLog};
pub use worker::Worker;
