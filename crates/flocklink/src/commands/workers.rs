//! Worker command handlers.

use std::sync::Arc;

use tabled::Tabled;

use flocklink_core::model::{EntityId, Worker};
use flocklink_core::{Console, WorkerDraft};

use crate::cli::{GlobalOpts, WorkersArgs, WorkersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct WorkerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Farm")]
    farm: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Daily tasks")]
    daily: String,
}

fn worker_row(console: &Console, w: &Arc<Worker>) -> WorkerRow {
    WorkerRow {
        id: w.id.to_string(),
        name: w.name.clone(),
        farm: util::farm_name(console, &w.farm_id),
        role: w.role.clone().unwrap_or_default(),
        active: if w.is_active { "yes" } else { "no" }.into(),
        daily: if w.receive_daily_tasks { "yes" } else { "" }.into(),
    }
}

fn worker_detail(w: &Arc<Worker>) -> String {
    let mut lines = vec![format!("Worker {} - {}", w.id, w.name)];
    if let Some(role) = &w.role {
        lines.push(format!("  role:   {role}"));
    }
    if let Some(email) = &w.email {
        lines.push(format!("  email:  {email}"));
    }
    if let Some(phone) = &w.phone {
        lines.push(format!("  phone:  {phone}"));
    }
    lines.push(format!("  active: {}", w.is_active));
    lines.join("\n")
}

fn draft_from_flags(
    farm: i64,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    role: Option<String>,
    inactive: bool,
    daily_tasks: bool,
) -> WorkerDraft {
    WorkerDraft {
        farm_id: farm,
        name,
        email,
        phone,
        role,
        is_active: !inactive,
        receive_daily_tasks: daily_tasks,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: WorkersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        WorkersCommand::List { farm } => {
            let snap = console.store().workers.snapshot();
            let workers: Vec<Arc<Worker>> = snap
                .iter()
                .filter(|w| farm.is_none_or(|id| w.farm_id == EntityId::Int(id)))
                .cloned()
                .collect();
            let out = output::render_list(
                &global.output,
                &workers,
                |w| worker_row(console, w),
                |w| w.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WorkersCommand::Get { id } => {
            let worker = util::require_cached(&console.store().workers, id, "worker")?;
            let out = output::render_single(&global.output, &worker, worker_detail, |w| {
                w.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WorkersCommand::Create {
            name,
            farm,
            email,
            phone,
            role,
            inactive,
            daily_tasks,
        } => {
            let draft = draft_from_flags(farm, name, email, phone, role, inactive, daily_tasks);
            let worker = console.create_worker(&draft).await?;
            util::report_done(
                &format!("Worker '{}' added (id {})", worker.name, worker.id),
                global.quiet,
            );
            Ok(())
        }

        WorkersCommand::Update {
            id,
            name,
            farm,
            email,
            phone,
            role,
            inactive,
            daily_tasks,
        } => {
            let draft = draft_from_flags(farm, name, email, phone, role, inactive, daily_tasks);
            let worker = console.update_worker(id, &draft).await?;
            util::report_done(&format!("Worker '{}' updated", worker.name), global.quiet);
            Ok(())
        }

        WorkersCommand::Delete { id } => {
            let worker = util::require_cached(&console.store().workers, id, "worker")?;
            if !util::confirm(&format!("Remove worker '{}'?", worker.name), global.yes)? {
                return Ok(());
            }
            console.delete_worker(id).await?;
            util::report_done("Worker removed", global.quiet);
            Ok(())
        }
    }
}
