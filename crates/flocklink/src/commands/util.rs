//! Shared helpers for command handlers.

use flocklink_core::Console;
use flocklink_core::model::EntityId;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Look up a cached entity by integer id, with a readable error when it
/// is not there.
pub fn require_cached<T: flocklink_core::Entity>(
    store: &flocklink_core::ResourceStore<T>,
    id: i64,
    resource: &str,
) -> Result<std::sync::Arc<T>, CliError> {
    store.get(&EntityId::Int(id)).ok_or_else(|| CliError::NotFound {
        resource: format!("{resource} {id}"),
    })
}

/// Farm name for display, falling back to the raw id.
pub fn farm_name(console: &Console, id: &EntityId) -> String {
    console
        .store()
        .farms
        .get(id)
        .map_or_else(|| id.to_string(), |f| f.name.clone())
}

/// Case-insensitive substring match helper for client-side filters.
pub fn matches_search(haystacks: &[Option<&str>], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    haystacks
        .iter()
        .flatten()
        .any(|h| h.to_lowercase().contains(&needle))
}

/// Uniform handling for mutation results in quiet mode.
pub fn report_done(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}
