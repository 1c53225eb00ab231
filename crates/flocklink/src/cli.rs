//! Clap derive structures for the `flocklink` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// flocklink -- poultry farm operations from the command line
#[derive(Debug, Parser)]
#[command(
    name = "flocklink",
    version,
    about = "Manage farms, workers, task programs, and sensor integrations",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "FLOCKLINK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 's', env = "FLOCKLINK_SERVER", global = true)]
    pub server: Option<String>,

    /// Session token
    #[arg(long, env = "FLOCKLINK_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FLOCKLINK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FLOCKLINK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "FLOCKLINK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage farms
    #[command(alias = "f")]
    Farms(FarmsArgs),

    /// Manage farm workers
    #[command(alias = "w")]
    Workers(WorkersArgs),

    /// Manage task programs
    #[command(alias = "prog")]
    Programs(ProgramsArgs),

    /// Rotem sensor-integration dashboard
    Rotem(RotemArgs),

    /// Report templates, schedules, and run history
    Reports(ReportsArgs),

    /// Follow live data updates until interrupted
    Watch(WatchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FARMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FarmsArgs {
    #[command(subcommand)]
    pub command: FarmsCommand,
}

#[derive(Debug, Subcommand)]
pub enum FarmsCommand {
    /// List farms
    #[command(alias = "ls")]
    List {
        /// Filter by name or location
        #[arg(long, short = 'f')]
        search: Option<String>,
    },

    /// Get farm details
    Get {
        /// Farm id
        id: i64,
    },

    /// Create a farm
    Create {
        name: String,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        contact_name: Option<String>,

        #[arg(long)]
        contact_email: Option<String>,

        #[arg(long)]
        contact_phone: Option<String>,

        /// Link the farm to a Rotem controller
        #[arg(long)]
        rotem: bool,
    },

    /// Update a farm (full replace; unset flags clear their fields)
    Update {
        /// Farm id
        id: i64,

        name: String,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        contact_name: Option<String>,

        #[arg(long)]
        contact_email: Option<String>,

        #[arg(long)]
        contact_phone: Option<String>,

        #[arg(long)]
        rotem: bool,
    },

    /// Delete a farm
    #[command(alias = "rm")]
    Delete {
        /// Farm id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WORKERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WorkersArgs {
    #[command(subcommand)]
    pub command: WorkersCommand,
}

#[derive(Debug, Subcommand)]
pub enum WorkersCommand {
    /// List workers
    #[command(alias = "ls")]
    List {
        /// Only workers of this farm
        #[arg(long)]
        farm: Option<i64>,
    },

    /// Get worker details
    Get {
        /// Worker id
        id: i64,
    },

    /// Add a worker to a farm
    Create {
        name: String,

        /// Farm the worker belongs to
        #[arg(long)]
        farm: i64,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        role: Option<String>,

        /// Create in inactive state
        #[arg(long)]
        inactive: bool,

        /// Send this worker the daily task email (requires --email)
        #[arg(long)]
        daily_tasks: bool,
    },

    /// Update a worker (full replace)
    Update {
        /// Worker id
        id: i64,

        name: String,

        #[arg(long)]
        farm: i64,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        inactive: bool,

        #[arg(long)]
        daily_tasks: bool,
    },

    /// Delete a worker
    #[command(alias = "rm")]
    Delete {
        /// Worker id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PROGRAMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProgramsArgs {
    #[command(subcommand)]
    pub command: ProgramsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProgramsCommand {
    /// List task programs
    #[command(alias = "ls")]
    List,

    /// Show a program with its task schedule
    Get {
        /// Program id
        id: i64,
    },

    /// Create a task program
    Create {
        name: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Rename or re-describe a program
    Update {
        /// Program id
        id: i64,

        name: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a program and its tasks
    #[command(alias = "rm")]
    Delete {
        /// Program id
        id: i64,
    },

    /// Add a task to a program
    AddTask {
        /// Program id
        program: i64,

        title: String,

        /// Days after flock placement when the task is due
        #[arg(long, short = 'd')]
        day: i32,

        #[arg(long)]
        description: Option<String>,

        /// low, medium, high, or critical
        #[arg(long)]
        priority: Option<String>,

        /// Repeat daily from the offset onward
        #[arg(long)]
        recurring: bool,
    },

    /// Remove a task from a program
    RemoveTask {
        /// Program id
        program: i64,

        /// Task id
        task: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROTEM
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RotemArgs {
    #[command(subcommand)]
    pub command: RotemCommand,
}

#[derive(Debug, Subcommand)]
pub enum RotemCommand {
    /// Controller fleet summary
    Status,

    /// Integrated farms and their scrape health
    Farms,

    /// Recent sensor readings
    Data {
        /// Max readings to show
        #[arg(long, short = 'l', default_value = "50")]
        limit: u32,
    },

    /// Scrape log tail
    Logs {
        /// Max log entries to show
        #[arg(long, short = 'l', default_value = "25")]
        limit: u32,
    },

    /// Forecast values from the backend's prediction models
    Predictions {
        /// Max forecast rows to show
        #[arg(long, short = 'l', default_value = "50")]
        limit: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// List report templates
    Templates,

    /// List scheduled reports
    #[command(alias = "ls")]
    Scheduled,

    /// Schedule a report
    Schedule {
        /// Template id
        #[arg(long, short = 't')]
        template: i64,

        /// daily, weekly, or monthly
        #[arg(long, short = 'f', default_value = "daily")]
        frequency: String,

        /// Recipient email (repeatable)
        #[arg(long, short = 'r', required = true)]
        recipient: Vec<String>,

        /// Create in disabled state
        #[arg(long)]
        disabled: bool,
    },

    /// Cancel a scheduled report
    #[command(alias = "rm")]
    Delete {
        /// Scheduled report id
        id: i64,
    },

    /// Run history, newest first
    Runs {
        /// Max runs to show
        #[arg(long, short = 'l', default_value = "25")]
        limit: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WATCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll interval (e.g. "30s", "2m")
    #[arg(long, short = 'i', default_value = "30s")]
    pub interval: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the active configuration (tokens masked)
    Show,

    /// Print the config file path
    Path,

    /// Create or update a profile interactively
    Init,

    /// Set the default profile
    UseProfile {
        /// Profile name
        name: String,
    },
}
