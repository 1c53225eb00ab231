//! Live dashboard: follow store updates until interrupted.

use flocklink_core::Console;

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;

/// Print a status line on every completed poll cycle until Ctrl-C.
///
/// The poll interval was applied when the session was built, so by the
/// time we get here the background poller is already running.
pub async fn handle(
    console: &Console,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = console.store();
    let mut last_sync = store.subscribe_last_sync();
    let mut farms = store.farms.subscribe();

    if !global.quiet {
        eprintln!("Watching (every {}), Ctrl-C to stop", args.interval);
    }
    print_status(console);

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
            changed = last_sync.changed() => {
                if changed.is_err() {
                    break;
                }
                print_status(console);
            }
            changed = farms.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn print_status(console: &Console) {
    let store = console.store();
    let stamp = store
        .last_sync()
        .map_or_else(|| "never".into(), |t| t.format("%H:%M:%S").to_string());

    let mut line = format!(
        "[{stamp}] farms: {}  workers: {}",
        store.farms.len(),
        store.workers.len()
    );
    if let Some(summary) = store.rotem_summary() {
        line.push_str(&format!(
            "  controllers: {} active / {} failing",
            summary.active_controllers, summary.failing_controllers
        ));
    }
    if let Some(error) = store.rotem_error() {
        line.push_str(&format!("  [error: {error}]"));
    }
    println!("{line}");
}
