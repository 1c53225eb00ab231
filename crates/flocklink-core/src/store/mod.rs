//! Reactive data storage.
//!
//! [`DataStore`] composes one [`ResourceStore`] per entity type plus
//! watch channels for the Rotem dashboard feeds that have no stable
//! per-item identity (summary, recent readings, scrape logs,
//! predictions). Each store owns its collection exclusively; there are
//! no cross-store transactions.

mod collection;
mod resource;

pub use collection::Entity;
pub use resource::ResourceStore;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::model::{
    ControllerSummary, EntityId, Farm, Program, ReportExecution, ReportTemplate, RotemDataPoint,
    RotemFarm, RotemPrediction, ScheduledReport, ScrapeLog, Worker,
};

impl Entity for Farm {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

impl Entity for Worker {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

impl Entity for Program {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

impl Entity for RotemFarm {
    // Keyed by gateway name -- the stable identity on the Rotem side.
    fn entity_id(&self) -> EntityId {
        EntityId::Key(self.gateway_name.clone())
    }
}

impl Entity for ReportTemplate {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

impl Entity for ScheduledReport {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

impl Entity for ReportExecution {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

/// All cached state for one console session.
pub struct DataStore {
    pub farms: ResourceStore<Farm>,
    pub workers: ResourceStore<Worker>,
    pub programs: ResourceStore<Program>,
    pub rotem_farms: ResourceStore<RotemFarm>,
    pub report_templates: ResourceStore<ReportTemplate>,
    pub scheduled_reports: ResourceStore<ScheduledReport>,
    pub report_executions: ResourceStore<ReportExecution>,

    pub(crate) rotem_summary: watch::Sender<Option<ControllerSummary>>,
    pub(crate) recent_data: watch::Sender<Arc<Vec<RotemDataPoint>>>,
    pub(crate) scrape_logs: watch::Sender<Arc<Vec<ScrapeLog>>>,
    pub(crate) predictions: watch::Sender<Arc<Vec<RotemPrediction>>>,

    /// Stamped after each fully-successful Rotem poll cycle.
    pub(crate) last_sync: watch::Sender<Option<DateTime<Utc>>>,
    /// Message from the most recent failed Rotem poll step, if any.
    pub(crate) rotem_error: watch::Sender<Option<String>>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        let (rotem_summary, _) = watch::channel(None);
        let (recent_data, _) = watch::channel(Arc::new(Vec::new()));
        let (scrape_logs, _) = watch::channel(Arc::new(Vec::new()));
        let (predictions, _) = watch::channel(Arc::new(Vec::new()));
        let (last_sync, _) = watch::channel(None);
        let (rotem_error, _) = watch::channel(None);

        Self {
            farms: ResourceStore::new(),
            workers: ResourceStore::new(),
            programs: ResourceStore::new(),
            rotem_farms: ResourceStore::new(),
            report_templates: ResourceStore::new(),
            scheduled_reports: ResourceStore::new(),
            report_executions: ResourceStore::new(),
            rotem_summary,
            recent_data,
            scrape_logs,
            predictions,
            last_sync,
            rotem_error,
        }
    }

    // ── Dashboard feed accessors ─────────────────────────────────────

    pub fn rotem_summary(&self) -> Option<ControllerSummary> {
        self.rotem_summary.borrow().clone()
    }

    pub fn subscribe_rotem_summary(&self) -> watch::Receiver<Option<ControllerSummary>> {
        self.rotem_summary.subscribe()
    }

    pub fn recent_data(&self) -> Arc<Vec<RotemDataPoint>> {
        self.recent_data.borrow().clone()
    }

    pub fn subscribe_recent_data(&self) -> watch::Receiver<Arc<Vec<RotemDataPoint>>> {
        self.recent_data.subscribe()
    }

    pub fn scrape_logs(&self) -> Arc<Vec<ScrapeLog>> {
        self.scrape_logs.borrow().clone()
    }

    pub fn subscribe_scrape_logs(&self) -> watch::Receiver<Arc<Vec<ScrapeLog>>> {
        self.scrape_logs.subscribe()
    }

    pub fn predictions(&self) -> Arc<Vec<RotemPrediction>> {
        self.predictions.borrow().clone()
    }

    pub fn subscribe_predictions(&self) -> watch::Receiver<Arc<Vec<RotemPrediction>>> {
        self.predictions.subscribe()
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        *self.last_sync.borrow()
    }

    pub fn subscribe_last_sync(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_sync.subscribe()
    }

    pub fn rotem_error(&self) -> Option<String> {
        self.rotem_error.borrow().clone()
    }
}
