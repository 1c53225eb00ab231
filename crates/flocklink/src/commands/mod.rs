//! Command handlers.

pub mod config_cmd;
pub mod farms;
pub mod programs;
pub mod reports;
pub mod rotem;
pub mod util;
pub mod watch;
pub mod workers;

use flocklink_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler. `Config` is handled earlier,
/// before a session exists.
pub async fn dispatch(
    command: Command,
    console: &Console,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Farms(args) => farms::handle(console, args, global).await,
        Command::Workers(args) => workers::handle(console, args, global).await,
        Command::Programs(args) => programs::handle(console, args, global).await,
        Command::Rotem(args) => rotem::handle(console, args, global),
        Command::Reports(args) => reports::handle(console, args, global).await,
        Command::Watch(args) => watch::handle(console, args, global).await,
        Command::Config(_) => unreachable!("handled before connecting"),
    }
}
