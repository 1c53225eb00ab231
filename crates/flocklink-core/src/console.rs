// ── Console abstraction ──
//
// Full lifecycle management for a farm-operations backend session.
// Handles token verification, the initial data load, background Rotem
// polling, and server-confirmed mutations routed through the DataStore.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use flocklink_api::ApiClient;
use flocklink_api::types::ProgramWrite;

use crate::config::ConsoleConfig;
use crate::error::CoreError;
use crate::model::{
    EntityId, Farm, Program, ReportExecution, ReportTemplate, ScheduledReport, Worker,
};
use crate::poller::{rotem_refresh_cycle, spawn_rotem_poller};
use crate::store::DataStore;
use crate::validate::{FarmDraft, ProgramTaskDraft, ScheduledReportDraft, WorkerDraft};

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

/// The profile behind the active session token.
#[derive(Debug, Clone)]
pub struct SessionProfile {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

// ── Console ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ConsoleInner>`. Manages the session
/// lifecycle: token verification, initial load, background polling,
/// and mutation routing. All mutations go to the server first; the
/// cache changes only on a confirmed response.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    config: ConsoleConfig,
    store: Arc<DataStore>,
    state: watch::Sender<ConnectionState>,
    client: Mutex<Option<Arc<ApiClient>>>,
    profile: Mutex<Option<SessionProfile>>,
    cancel: CancellationToken,
    /// Child token for the current session -- cancelled on disconnect,
    /// replaced on reconnect (avoids permanent cancellation).
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
    /// Guards Rotem refresh cycles: manual refresh and the poller share
    /// it so cycles never overlap.
    rotem_in_flight: Arc<AtomicBool>,
}

impl Console {
    /// Create a new Console from configuration. Does NOT connect --
    /// call [`connect()`](Self::connect) to verify the token and start
    /// background tasks.
    pub fn new(config: ConsoleConfig) -> Self {
        let store = Arc::new(DataStore::new());
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(ConsoleInner {
                config,
                store,
                state,
                client: Mutex::new(None),
                profile: Mutex::new(None),
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
                rotem_in_flight: Arc::new(AtomicBool::new(false)),
            }),
        }
    }

    /// Access the console configuration.
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    /// Access the underlying DataStore.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe_connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state.subscribe()
    }

    /// The profile behind the token, populated by `connect()`.
    pub async fn profile(&self) -> Option<SessionProfile> {
        self.inner.profile.lock().await.clone()
    }

    // ── Session lifecycle ────────────────────────────────────────

    /// Connect to the backend.
    ///
    /// Verifies the token with a `whoami` round trip, performs the
    /// initial data load, and spawns the Rotem poller if a poll
    /// interval is configured.
    pub async fn connect(&self) -> Result<(), CoreError> {
        let _ = self.inner.state.send(ConnectionState::Connecting);

        let client = Arc::new(ApiClient::from_token(
            &self.inner.config.server,
            &self.inner.config.token,
            self.inner.config.scheme,
            &self.inner.config.transport(),
        )?);

        let profile = match client.whoami().await {
            Ok(p) => p,
            Err(e) => {
                let _ = self.inner.state.send(ConnectionState::Failed);
                return Err(e.into());
            }
        };
        info!(username = %profile.username, "authenticated");
        *self.inner.profile.lock().await = Some(SessionProfile {
            id: profile.id,
            username: profile.username,
            email: profile.email,
        });
        *self.inner.client.lock().await = Some(Arc::clone(&client));

        // Tear down any poller still running from an earlier connect,
        // then install a fresh child token so a previous disconnect does
        // not poison us.
        self.stop_background_tasks().await;
        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        if let Err(e) = self.refresh_all().await {
            warn!(error = %e, "initial load incomplete");
        }

        if !self.inner.config.poll_interval.is_zero() {
            let handle = spawn_rotem_poller(
                client,
                Arc::clone(&self.inner.store),
                Arc::clone(&self.inner.rotem_in_flight),
                self.inner.config.poll_interval,
                child,
            );
            self.inner.task_handles.lock().await.push(handle);
        }

        let _ = self.inner.state.send(ConnectionState::Connected);
        Ok(())
    }

    /// Disconnect: stop background tasks and drop the session.
    ///
    /// Cached data stays readable after disconnect; only refreshes and
    /// mutations are refused.
    pub async fn disconnect(&self) {
        self.stop_background_tasks().await;
        *self.inner.client.lock().await = None;
        *self.inner.profile.lock().await = None;
        let _ = self.inner.state.send(ConnectionState::Disconnected);
        info!("disconnected");
    }

    /// Cancel the current session's child token and await every spawned
    /// task. Shared by `disconnect()` and reconnects.
    async fn stop_background_tasks(&self) {
        self.inner.cancel_child.lock().await.cancel();
        let handles: Vec<_> = self.inner.task_handles.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                debug!(error = %e, "background task ended abnormally");
            }
        }
    }

    async fn client(&self) -> Result<Arc<ApiClient>, CoreError> {
        self.inner
            .client
            .lock()
            .await
            .clone()
            .ok_or(CoreError::Disconnected)
    }

    // ── Refresh ──────────────────────────────────────────────────

    /// Reload every resource. Store contents update independently; the
    /// first failure is returned after all refreshes have settled.
    pub async fn refresh_all(&self) -> Result<(), CoreError> {
        let (farms, workers, programs, reports, rotem) = tokio::join!(
            self.refresh_farms(),
            self.refresh_workers(),
            self.refresh_programs(),
            self.refresh_reports(),
            self.refresh_rotem(),
        );
        farms.and(workers).and(programs).and(reports).and(rotem)
    }

    pub async fn refresh_farms(&self) -> Result<(), CoreError> {
        let client = self.client().await?;
        let seq = self.inner.store.farms.begin_fetch();
        match client.list_farms(None).await {
            Ok(items) => {
                let farms: Vec<Farm> = items.into_iter().map(Into::into).collect();
                self.inner.store.farms.apply_fetch(seq, farms);
                Ok(())
            }
            Err(e) => {
                self.inner.store.farms.fail_fetch(seq, e.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn refresh_workers(&self) -> Result<(), CoreError> {
        let client = self.client().await?;
        let seq = self.inner.store.workers.begin_fetch();
        match client.list_workers(None).await {
            Ok(items) => {
                let workers: Vec<Worker> = items.into_iter().map(Into::into).collect();
                self.inner.store.workers.apply_fetch(seq, workers);
                Ok(())
            }
            Err(e) => {
                self.inner.store.workers.fail_fetch(seq, e.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn refresh_programs(&self) -> Result<(), CoreError> {
        let client = self.client().await?;
        let seq = self.inner.store.programs.begin_fetch();
        match client.list_programs().await {
            Ok(items) => {
                let programs: Vec<Program> = items.into_iter().map(Into::into).collect();
                self.inner.store.programs.apply_fetch(seq, programs);
                Ok(())
            }
            Err(e) => {
                self.inner.store.programs.fail_fetch(seq, e.to_string());
                Err(e.into())
            }
        }
    }

    /// Reload report templates, schedules, and run history.
    pub async fn refresh_reports(&self) -> Result<(), CoreError> {
        let client = self.client().await?;
        let mut first_error: Option<CoreError> = None;

        let seq = self.inner.store.report_templates.begin_fetch();
        match client.list_report_templates().await {
            Ok(items) => {
                let templates: Vec<ReportTemplate> = items.into_iter().map(Into::into).collect();
                self.inner.store.report_templates.apply_fetch(seq, templates);
            }
            Err(e) => {
                self.inner
                    .store
                    .report_templates
                    .fail_fetch(seq, e.to_string());
                first_error.get_or_insert(e.into());
            }
        }

        let seq = self.inner.store.scheduled_reports.begin_fetch();
        match client.list_scheduled_reports().await {
            Ok(items) => {
                let reports: Vec<ScheduledReport> = items.into_iter().map(Into::into).collect();
                self.inner.store.scheduled_reports.apply_fetch(seq, reports);
            }
            Err(e) => {
                self.inner
                    .store
                    .scheduled_reports
                    .fail_fetch(seq, e.to_string());
                first_error.get_or_insert(e.into());
            }
        }

        let seq = self.inner.store.report_executions.begin_fetch();
        match client.list_report_executions(None).await {
            Ok(items) => {
                let runs: Vec<ReportExecution> = items.into_iter().map(Into::into).collect();
                self.inner.store.report_executions.apply_fetch(seq, runs);
            }
            Err(e) => {
                self.inner
                    .store
                    .report_executions
                    .fail_fetch(seq, e.to_string());
                first_error.get_or_insert(e.into());
            }
        }

        match first_error {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    /// Run one Rotem refresh cycle now, unless one is already running.
    pub async fn refresh_rotem(&self) -> Result<(), CoreError> {
        let client = self.client().await?;
        if self
            .inner
            .rotem_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("rotem refresh already in flight");
            return Ok(());
        }
        let result = rotem_refresh_cycle(&client, &self.inner.store).await;
        self.inner.rotem_in_flight.store(false, Ordering::SeqCst);
        result
    }

    // ── Farms ────────────────────────────────────────────────────

    pub async fn create_farm(&self, draft: &FarmDraft) -> Result<Farm, CoreError> {
        let body = draft.validate().map_err(CoreError::Validation)?;
        let client = self.client().await?;
        let farm: Farm = client.create_farm(&body).await?.into();
        self.inner.store.farms.apply_confirmed(farm.clone());
        Ok(farm)
    }

    pub async fn update_farm(&self, id: i64, draft: &FarmDraft) -> Result<Farm, CoreError> {
        let body = draft.validate().map_err(CoreError::Validation)?;
        let client = self.client().await?;
        let farm: Farm = client.update_farm(id, &body).await?.into();
        self.inner.store.farms.apply_confirmed(farm.clone());
        Ok(farm)
    }

    pub async fn delete_farm(&self, id: i64) -> Result<(), CoreError> {
        let client = self.client().await?;
        client.delete_farm(id).await?;
        self.inner.store.farms.apply_removed(&EntityId::Int(id));
        Ok(())
    }

    // ── Workers ──────────────────────────────────────────────────

    pub async fn create_worker(&self, draft: &WorkerDraft) -> Result<Worker, CoreError> {
        let body = draft.validate().map_err(CoreError::Validation)?;
        let client = self.client().await?;
        let worker: Worker = client.create_worker(&body).await?.into();
        self.inner.store.workers.apply_confirmed(worker.clone());
        Ok(worker)
    }

    pub async fn update_worker(&self, id: i64, draft: &WorkerDraft) -> Result<Worker, CoreError> {
        let body = draft.validate().map_err(CoreError::Validation)?;
        let client = self.client().await?;
        let worker: Worker = client.update_worker(id, &body).await?.into();
        self.inner.store.workers.apply_confirmed(worker.clone());
        Ok(worker)
    }

    pub async fn delete_worker(&self, id: i64) -> Result<(), CoreError> {
        let client = self.client().await?;
        client.delete_worker(id).await?;
        self.inner.store.workers.apply_removed(&EntityId::Int(id));
        Ok(())
    }

    // ── Task programs ────────────────────────────────────────────

    pub async fn create_program(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Program, CoreError> {
        let body = program_body(name, description)?;
        let client = self.client().await?;
        let program: Program = client.create_program(&body).await?.into();
        self.inner.store.programs.apply_confirmed(program.clone());
        Ok(program)
    }

    pub async fn update_program(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Program, CoreError> {
        let body = program_body(name, description)?;
        let client = self.client().await?;
        let program: Program = client.update_program(id, &body).await?.into();
        self.inner.store.programs.apply_confirmed(program.clone());
        Ok(program)
    }

    pub async fn delete_program(&self, id: i64) -> Result<(), CoreError> {
        let client = self.client().await?;
        client.delete_program(id).await?;
        self.inner.store.programs.apply_removed(&EntityId::Int(id));
        Ok(())
    }

    /// Add a task to a program. The program is re-fetched afterwards so
    /// the cached entry carries the server's view of its task list.
    pub async fn add_program_task(&self, draft: &ProgramTaskDraft) -> Result<Program, CoreError> {
        let body = draft.validate().map_err(CoreError::Validation)?;
        let client = self.client().await?;
        client.create_program_task(&body).await?;
        let program: Program = client.get_program(draft.program_id).await?.into();
        self.inner.store.programs.apply_confirmed(program.clone());
        Ok(program)
    }

    /// Remove a task from a program, then re-fetch the program.
    pub async fn remove_program_task(
        &self,
        program_id: i64,
        task_id: i64,
    ) -> Result<Program, CoreError> {
        let client = self.client().await?;
        client.delete_program_task(task_id).await?;
        let program: Program = client.get_program(program_id).await?.into();
        self.inner.store.programs.apply_confirmed(program.clone());
        Ok(program)
    }

    // ── Scheduled reports ────────────────────────────────────────

    pub async fn create_scheduled_report(
        &self,
        draft: &ScheduledReportDraft,
    ) -> Result<ScheduledReport, CoreError> {
        let body = draft.validate().map_err(CoreError::Validation)?;
        let client = self.client().await?;
        let report: ScheduledReport = client.create_scheduled_report(&body).await?.into();
        self.inner
            .store
            .scheduled_reports
            .apply_confirmed(report.clone());
        Ok(report)
    }

    pub async fn update_scheduled_report(
        &self,
        id: i64,
        draft: &ScheduledReportDraft,
    ) -> Result<ScheduledReport, CoreError> {
        let body = draft.validate().map_err(CoreError::Validation)?;
        let client = self.client().await?;
        let report: ScheduledReport = client.update_scheduled_report(id, &body).await?.into();
        self.inner
            .store
            .scheduled_reports
            .apply_confirmed(report.clone());
        Ok(report)
    }

    pub async fn delete_scheduled_report(&self, id: i64) -> Result<(), CoreError> {
        let client = self.client().await?;
        client.delete_scheduled_report(id).await?;
        self.inner
            .store
            .scheduled_reports
            .apply_removed(&EntityId::Int(id));
        Ok(())
    }
}

fn program_body(name: &str, description: Option<&str>) -> Result<ProgramWrite, CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(vec![flocklink_api::FieldError {
            field: "name".into(),
            message: "name is required".into(),
        }]));
    }
    Ok(ProgramWrite {
        name: name.trim().to_owned(),
        description: description
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
    })
}
