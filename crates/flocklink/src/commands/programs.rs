//! Task-program command handlers.

use std::fmt::Write as _;
use std::sync::Arc;

use tabled::Tabled;

use flocklink_core::model::{Program, TaskPriority};
use flocklink_core::{Console, ProgramTaskDraft};

use crate::cli::{GlobalOpts, ProgramsArgs, ProgramsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProgramRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Tasks")]
    tasks: usize,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Arc<Program>> for ProgramRow {
    fn from(p: &Arc<Program>) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            tasks: p.tasks.len(),
            description: p.description.clone().unwrap_or_default(),
        }
    }
}

fn program_detail(p: &Arc<Program>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Program {} - {}", p.id, p.name);
    if let Some(description) = &p.description {
        let _ = writeln!(out, "  {description}");
    }
    let mut tasks: Vec<_> = p.tasks.iter().collect();
    tasks.sort_by_key(|t| t.day_offset);
    for task in tasks {
        let recurring = if task.recurring { " (recurring)" } else { "" };
        let _ = writeln!(
            out,
            "  day {:>3}  [{}] {}{recurring}",
            task.day_offset, task.priority, task.title
        );
    }
    out.truncate(out.trim_end().len());
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: ProgramsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProgramsCommand::List => {
            let snap = console.store().programs.snapshot();
            let programs: Vec<Arc<Program>> = snap.iter().cloned().collect();
            let out = output::render_list(
                &global.output,
                &programs,
                |p| ProgramRow::from(p),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProgramsCommand::Get { id } => {
            let program = util::require_cached(&console.store().programs, id, "program")?;
            let out = output::render_single(&global.output, &program, program_detail, |p| {
                p.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProgramsCommand::Create { name, description } => {
            let program = console.create_program(&name, description.as_deref()).await?;
            util::report_done(
                &format!("Program '{}' created (id {})", program.name, program.id),
                global.quiet,
            );
            Ok(())
        }

        ProgramsCommand::Update {
            id,
            name,
            description,
        } => {
            let program = console
                .update_program(id, &name, description.as_deref())
                .await?;
            util::report_done(&format!("Program '{}' updated", program.name), global.quiet);
            Ok(())
        }

        ProgramsCommand::Delete { id } => {
            let program = util::require_cached(&console.store().programs, id, "program")?;
            if !util::confirm(
                &format!(
                    "Delete program '{}' and its {} tasks?",
                    program.name,
                    program.tasks.len()
                ),
                global.yes,
            )? {
                return Ok(());
            }
            console.delete_program(id).await?;
            util::report_done("Program deleted", global.quiet);
            Ok(())
        }

        ProgramsCommand::AddTask {
            program,
            title,
            day,
            description,
            priority,
            recurring,
        } => {
            let priority = match priority.as_deref() {
                None => TaskPriority::default(),
                Some(raw) => raw.parse().map_err(|_| CliError::Usage {
                    field: "priority".into(),
                    reason: format!("expected low, medium, high, or critical, got '{raw}'"),
                })?,
            };
            let draft = ProgramTaskDraft {
                program_id: program,
                day_offset: day,
                title,
                description,
                priority,
                recurring,
            };
            let updated = console.add_program_task(&draft).await?;
            util::report_done(
                &format!("Task added to '{}' ({} tasks)", updated.name, updated.tasks.len()),
                global.quiet,
            );
            Ok(())
        }

        ProgramsCommand::RemoveTask { program, task } => {
            let updated = console.remove_program_task(program, task).await?;
            util::report_done(
                &format!("Task removed from '{}'", updated.name),
                global.quiet,
            );
            Ok(())
        }
    }
}
