//! Farm command handlers.

use std::fmt::Write as _;
use std::sync::Arc;

use tabled::Tabled;

use flocklink_core::model::{Farm, IntegrationType};
use flocklink_core::{Console, FarmDraft};

use crate::cli::{FarmsArgs, FarmsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FarmRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Integration")]
    integration: String,
    #[tabled(rename = "Houses")]
    houses: String,
    #[tabled(rename = "Workers")]
    workers: String,
}

impl From<&Arc<Farm>> for FarmRow {
    fn from(f: &Arc<Farm>) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            location: f.location.clone().unwrap_or_default(),
            integration: match f.integration {
                IntegrationType::None => String::new(),
                other => other.to_string(),
            },
            houses: f.house_count.map(|c| c.to_string()).unwrap_or_default(),
            workers: f.worker_count.map(|c| c.to_string()).unwrap_or_default(),
        }
    }
}

fn farm_detail(f: &Arc<Farm>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Farm {} - {}", f.id, f.name);
    if let Some(location) = &f.location {
        let _ = writeln!(out, "  location:  {location}");
    }
    if let Some(name) = &f.contact_name {
        let _ = writeln!(out, "  contact:   {name}");
    }
    if let Some(email) = &f.contact_email {
        let _ = writeln!(out, "  email:     {email}");
    }
    if let Some(phone) = &f.contact_phone {
        let _ = writeln!(out, "  phone:     {phone}");
    }
    if f.integration != IntegrationType::None {
        let _ = writeln!(
            out,
            "  integration: {} ({})",
            f.integration,
            f.integration_status.as_deref().unwrap_or("unknown")
        );
    }
    out.truncate(out.trim_end().len());
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: FarmsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FarmsCommand::List { search } => {
            let snap = console.store().farms.snapshot();
            let farms: Vec<Arc<Farm>> = snap
                .iter()
                .filter(|f| {
                    search.as_deref().is_none_or(|needle| {
                        util::matches_search(&[Some(&f.name), f.location.as_deref()], needle)
                    })
                })
                .cloned()
                .collect();
            let out = output::render_list(
                &global.output,
                &farms,
                |f| FarmRow::from(f),
                |f| f.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FarmsCommand::Get { id } => {
            let farm = util::require_cached(&console.store().farms, id, "farm")?;
            let out = output::render_single(&global.output, &farm, farm_detail, |f| {
                f.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FarmsCommand::Create {
            name,
            location,
            contact_name,
            contact_email,
            contact_phone,
            rotem,
        } => {
            let draft = FarmDraft {
                name,
                location,
                contact_name,
                contact_email,
                contact_phone,
                integration: if rotem {
                    IntegrationType::Rotem
                } else {
                    IntegrationType::None
                },
            };
            let farm = console.create_farm(&draft).await?;
            util::report_done(&format!("Farm '{}' created (id {})", farm.name, farm.id), global.quiet);
            Ok(())
        }

        FarmsCommand::Update {
            id,
            name,
            location,
            contact_name,
            contact_email,
            contact_phone,
            rotem,
        } => {
            let draft = FarmDraft {
                name,
                location,
                contact_name,
                contact_email,
                contact_phone,
                integration: if rotem {
                    IntegrationType::Rotem
                } else {
                    IntegrationType::None
                },
            };
            let farm = console.update_farm(id, &draft).await?;
            util::report_done(&format!("Farm '{}' updated", farm.name), global.quiet);
            Ok(())
        }

        FarmsCommand::Delete { id } => {
            let farm = util::require_cached(&console.store().farms, id, "farm")?;
            if !util::confirm(
                &format!("Delete farm '{}'? Its workers lose their assignment.", farm.name),
                global.yes,
            )? {
                return Ok(());
            }
            console.delete_farm(id).await?;
            util::report_done("Farm deleted", global.quiet);
            Ok(())
        }
    }
}
