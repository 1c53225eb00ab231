//! Rotem integration command handlers.
//!
//! All data here was loaded by the connect-time refresh; handlers only
//! read the store.

use std::fmt::Write as _;
use std::sync::Arc;

use owo_colors::OwoColorize;
use tabled::Tabled;

use flocklink_core::Console;
use flocklink_core::model::{RotemDataPoint, RotemFarm, RotemPrediction, ScrapeLog};

use crate::cli::{GlobalOpts, RotemArgs, RotemCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct RotemFarmRow {
    #[tabled(rename = "Gateway")]
    gateway: String,
    #[tabled(rename = "Farm")]
    farm: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Success")]
    success: String,
    #[tabled(rename = "Last scrape")]
    last_scrape: String,
}

fn rotem_farm_row(console: &Console, color: bool, rf: &Arc<RotemFarm>) -> RotemFarmRow {
    let status = rf.scrape_status.clone().unwrap_or_else(|| "unknown".into());
    let status = if rf.is_failing() {
        if color {
            format!("{}", status.red())
        } else {
            format!("{status} (!)")
        }
    } else {
        status
    };
    RotemFarmRow {
        gateway: rf.gateway_name.clone(),
        farm: util::farm_name(console, &rf.farm_id),
        status,
        success: rf
            .success_rate
            .map(|r| format!("{:.0}%", r * 100.0))
            .unwrap_or_default(),
        last_scrape: rf
            .last_scrape
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
    }
}

#[derive(Tabled)]
struct DataPointRow {
    #[tabled(rename = "Recorded")]
    recorded: String,
    #[tabled(rename = "Controller")]
    controller: String,
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&RotemDataPoint> for DataPointRow {
    fn from(p: &RotemDataPoint) -> Self {
        Self {
            recorded: p.recorded_at.format("%H:%M:%S").to_string(),
            controller: p.controller.clone(),
            metric: p.metric.clone(),
            value: format!("{:.1}", p.value),
        }
    }
}

#[derive(Tabled)]
struct ScrapeLogRow {
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Farm")]
    farm: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Message")]
    message: String,
}

fn scrape_log_row(console: &Console, log: &ScrapeLog) -> ScrapeLogRow {
    ScrapeLogRow {
        started: log.started_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        farm: util::farm_name(console, &log.farm_id),
        result: if log.success { "ok" } else { "failed" }.into(),
        message: log.message.clone().unwrap_or_default(),
    }
}

#[derive(Tabled)]
struct PredictionRow {
    #[tabled(rename = "For")]
    predicted_for: String,
    #[tabled(rename = "Controller")]
    controller: String,
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Predicted")]
    predicted: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

impl From<&RotemPrediction> for PredictionRow {
    fn from(p: &RotemPrediction) -> Self {
        Self {
            predicted_for: p.predicted_for.format("%Y-%m-%d %H:%M").to_string(),
            controller: p.controller.clone(),
            metric: p.metric.clone(),
            predicted: format!("{:.1}", p.predicted_value),
            confidence: p
                .confidence
                .map(|c| format!("{:.0}%", c * 100.0))
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(console: &Console, args: RotemArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    match args.command {
        RotemCommand::Status => {
            let store = console.store();
            let Some(summary) = store.rotem_summary() else {
                return Err(CliError::Other("no controller summary available".into()));
            };

            let mut out = String::new();
            let _ = writeln!(out, "Integrated farms:    {}", summary.total_farms);
            let _ = writeln!(out, "Active controllers:  {}", summary.active_controllers);
            let failing = summary.failing_controllers;
            if failing > 0 && color {
                let _ = writeln!(out, "Failing controllers: {}", failing.red());
            } else {
                let _ = writeln!(out, "Failing controllers: {failing}");
            }
            if let Some(synced) = store.last_sync() {
                let _ = writeln!(out, "Last sync:           {}", synced.format("%H:%M:%S"));
            }
            if let Some(error) = store.rotem_error() {
                let _ = writeln!(out, "Last error:          {error}");
            }
            out.truncate(out.trim_end().len());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RotemCommand::Farms => {
            let snap = console.store().rotem_farms.snapshot();
            let farms: Vec<Arc<RotemFarm>> = snap.iter().cloned().collect();
            let out = output::render_list(
                &global.output,
                &farms,
                |rf| rotem_farm_row(console, color, rf),
                |rf| rf.gateway_name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RotemCommand::Data { limit } => {
            let snap = console.store().recent_data();
            let points: Vec<RotemDataPoint> =
                snap.iter().take(limit as usize).cloned().collect();
            let out = output::render_list(&global.output, &points, |p| DataPointRow::from(p), |p| {
                format!("{} {} {}", p.controller, p.metric, p.value)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RotemCommand::Logs { limit } => {
            let snap = console.store().scrape_logs();
            let logs: Vec<ScrapeLog> = snap.iter().take(limit as usize).cloned().collect();
            let out = output::render_list(
                &global.output,
                &logs,
                |l| scrape_log_row(console, l),
                |l| l.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RotemCommand::Predictions { limit } => {
            let snap = console.store().predictions();
            let preds: Vec<RotemPrediction> =
                snap.iter().take(limit as usize).cloned().collect();
            let out = output::render_list(&global.output, &preds, |p| PredictionRow::from(p), |p| {
                format!("{} {} {}", p.controller, p.metric, p.predicted_value)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
