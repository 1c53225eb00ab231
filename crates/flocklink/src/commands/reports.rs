//! Reporting command handlers.

use std::sync::Arc;

use tabled::Tabled;

use flocklink_core::model::{ReportExecution, ReportTemplate, ScheduledReport};
use flocklink_core::{Console, ScheduledReportDraft};

use crate::cli::{GlobalOpts, ReportsArgs, ReportsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Metrics")]
    metrics: String,
}

impl From<&Arc<ReportTemplate>> for TemplateRow {
    fn from(t: &Arc<ReportTemplate>) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name.clone(),
            metrics: t.metrics.join(", "),
        }
    }
}

#[derive(Tabled)]
struct ScheduledRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Template")]
    template: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Recipients")]
    recipients: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

fn scheduled_row(console: &Console, r: &Arc<ScheduledReport>) -> ScheduledRow {
    let template = console
        .store()
        .report_templates
        .get(&r.template_id)
        .map_or_else(|| r.template_id.to_string(), |t| t.name.clone());
    ScheduledRow {
        id: r.id.to_string(),
        template,
        frequency: r.frequency.to_string(),
        recipients: r.recipients.join(", "),
        enabled: if r.enabled { "yes" } else { "no" }.into(),
    }
}

#[derive(Tabled)]
struct RunRow {
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Schedule")]
    schedule: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl From<&Arc<ReportExecution>> for RunRow {
    fn from(r: &Arc<ReportExecution>) -> Self {
        Self {
            started: r.started_at.format("%Y-%m-%d %H:%M").to_string(),
            schedule: r.scheduled_report_id.to_string(),
            status: r.status.to_string(),
            detail: r.detail.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: ReportsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ReportsCommand::Templates => {
            let snap = console.store().report_templates.snapshot();
            let templates: Vec<Arc<ReportTemplate>> = snap.iter().cloned().collect();
            let out = output::render_list(
                &global.output,
                &templates,
                |t| TemplateRow::from(t),
                |t| t.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReportsCommand::Scheduled => {
            let snap = console.store().scheduled_reports.snapshot();
            let reports: Vec<Arc<ScheduledReport>> = snap.iter().cloned().collect();
            let out = output::render_list(
                &global.output,
                &reports,
                |r| scheduled_row(console, r),
                |r| r.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReportsCommand::Schedule {
            template,
            frequency,
            recipient,
            disabled,
        } => {
            let frequency = frequency.parse().map_err(|_| CliError::Usage {
                field: "frequency".into(),
                reason: format!("expected daily, weekly, or monthly, got '{frequency}'"),
            })?;
            let draft = ScheduledReportDraft {
                template_id: template,
                frequency,
                recipients: recipient,
                enabled: !disabled,
            };
            let report = console.create_scheduled_report(&draft).await?;
            util::report_done(
                &format!("Report scheduled (id {}, {})", report.id, report.frequency),
                global.quiet,
            );
            Ok(())
        }

        ReportsCommand::Delete { id } => {
            if !util::confirm(&format!("Cancel scheduled report {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_scheduled_report(id).await?;
            util::report_done("Scheduled report cancelled", global.quiet);
            Ok(())
        }

        ReportsCommand::Runs { limit } => {
            let snap = console.store().report_executions.snapshot();
            let mut runs: Vec<Arc<ReportExecution>> = snap.iter().cloned().collect();
            runs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
            runs.truncate(limit as usize);
            let out =
                output::render_list(&global.output, &runs, |r| RunRow::from(r), |r| r.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
