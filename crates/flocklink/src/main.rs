mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flocklink_core::Console;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend session
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Everything else connects first
        cmd => {
            let console_config = config::build_console_config(&cli.global, poll_interval(&cmd)?)?;
            let console = Console::new(console_config);

            tracing::debug!(command = ?cmd, "dispatching command");
            console.connect().await.map_err(CliError::from)?;
            let result = commands::dispatch(cmd, &console, &cli.global).await;
            console.disconnect().await;
            result
        }
    }
}

/// One-shot commands skip background polling; `watch` sets its own
/// interval.
fn poll_interval(cmd: &Command) -> Result<std::time::Duration, CliError> {
    match cmd {
        Command::Watch(args) => {
            humantime::parse_duration(&args.interval).map_err(|e| CliError::Usage {
                field: "interval".into(),
                reason: e.to_string(),
            })
        }
        _ => Ok(std::time::Duration::ZERO),
    }
}
