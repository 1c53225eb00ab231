// ── Background polling ──
//
// The Rotem dashboard data (controller health, recent readings, scrape
// logs, predictions) is refreshed on a fixed interval. A cycle already in flight is
// never overlapped: if a manual refresh is running when the tick fires,
// the tick is skipped and the next one picks up.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use flocklink_api::ApiClient;

use crate::error::CoreError;
use crate::model::{ControllerSummary, RotemDataPoint, RotemFarm, RotemPrediction, ScrapeLog};
use crate::store::DataStore;

/// Recent readings kept for the dashboard sparkline.
pub(crate) const RECENT_DATA_LIMIT: u32 = 50;
/// Scrape-log tail shown on the integration health page.
pub(crate) const SCRAPE_LOG_LIMIT: u32 = 25;
/// Forecast rows kept for the dashboard prediction panel.
pub(crate) const PREDICTION_LIMIT: u32 = 50;

/// One full Rotem refresh cycle.
///
/// Steps run in order and a failed step does not abort the rest, so one
/// flaky endpoint cannot starve the others of fresh data. `last_sync`
/// is stamped only when every step succeeded; otherwise the first
/// failure lands in the store's `rotem_error` and is returned.
pub(crate) async fn rotem_refresh_cycle(
    client: &ApiClient,
    store: &DataStore,
) -> Result<(), CoreError> {
    let mut first_error: Option<flocklink_api::Error> = None;

    let seq = store.rotem_farms.begin_fetch();
    match client.list_rotem_farms().await {
        Ok(farms) => {
            let farms: Vec<RotemFarm> = farms.into_iter().map(Into::into).collect();
            store.rotem_farms.apply_fetch(seq, farms);
        }
        Err(e) => {
            store.rotem_farms.fail_fetch(seq, e.to_string());
            first_error.get_or_insert(e);
        }
    }

    match client.get_rotem_summary().await {
        Ok(summary) => {
            let summary: ControllerSummary = summary.into();
            let _ = store.rotem_summary.send(Some(summary));
        }
        Err(e) => {
            first_error.get_or_insert(e);
        }
    }

    match client.list_rotem_data(Some(RECENT_DATA_LIMIT)).await {
        Ok(points) => {
            let points: Vec<RotemDataPoint> = points.into_iter().map(Into::into).collect();
            let _ = store.recent_data.send(Arc::new(points));
        }
        Err(e) => {
            first_error.get_or_insert(e);
        }
    }

    match client.list_scrape_logs(Some(SCRAPE_LOG_LIMIT)).await {
        Ok(logs) => {
            let logs: Vec<ScrapeLog> = logs.into_iter().map(Into::into).collect();
            let _ = store.scrape_logs.send(Arc::new(logs));
        }
        Err(e) => {
            first_error.get_or_insert(e);
        }
    }

    match client.list_rotem_predictions(Some(PREDICTION_LIMIT)).await {
        Ok(preds) => {
            let preds: Vec<RotemPrediction> = preds.into_iter().map(Into::into).collect();
            let _ = store.predictions.send(Arc::new(preds));
        }
        Err(e) => {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        None => {
            let _ = store.last_sync.send(Some(chrono::Utc::now()));
            let _ = store.rotem_error.send(None);
            Ok(())
        }
        Some(e) => {
            let _ = store.rotem_error.send(Some(e.to_string()));
            Err(e.into())
        }
    }
}

/// Spawn the periodic Rotem refresh task.
///
/// `in_flight` is shared with manual refreshes so the two never run a
/// cycle concurrently. Cancelling `cancel` ends the task.
pub(crate) fn spawn_rotem_poller(
    client: Arc<ApiClient>,
    store: Arc<DataStore>,
    in_flight: Arc<AtomicBool>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; connect() already did a full
        // refresh, so burn it.
        ticker.tick().await;

        info!(interval_secs = interval.as_secs(), "rotem poller started");
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    debug!("rotem poller stopping");
                    break;
                }
                _ = ticker.tick() => {
                    if in_flight
                        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                        .is_err()
                    {
                        debug!("refresh already in flight, skipping tick");
                        continue;
                    }
                    if let Err(e) = rotem_refresh_cycle(&client, &store).await {
                        warn!(error = %e, "rotem refresh failed");
                    }
                    in_flight.store(false, Ordering::SeqCst);
                }
            }
        }
    })
}
