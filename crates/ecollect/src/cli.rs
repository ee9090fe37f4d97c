//! Command-line interface definition.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "ecollect",
    version,
    about = "Admin console for the E-Collect kiosk network",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides the config file).
    #[arg(long, global = true, env = "ECOLLECT_SERVER")]
    pub server: Option<String>,

    /// Output format for list commands.
    #[arg(short = 'o', long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Assume yes for destructive confirmations.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    JsonCompact,
    Yaml,
    Plain,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in to the admin backend.
    Login(LoginArgs),

    /// End the current session.
    Logout,

    /// Show the current session state.
    Session,

    /// Fleet and usage statistics.
    Dashboard(DashboardArgs),

    /// Manage collection kiosks.
    Kiosks(KiosksArgs),

    /// Browse the user ledger.
    Users(LedgerListArgs),

    /// Browse the e-waste scan ledger.
    Ewaste(LedgerListArgs),

    /// Manage the config file.
    Config(ConfigArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Operator username (prompted when omitted).
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (prompted when omitted; prefer the prompt).
    #[arg(long)]
    pub password: Option<String>,
}

// ── Dashboard ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Keep polling and reprint on every update (10s cadence).
    #[arg(short, long)]
    pub watch: bool,
}

// ── Kiosks ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct KiosksArgs {
    #[command(subcommand)]
    pub command: KiosksCommand,
}

#[derive(Debug, Subcommand)]
pub enum KiosksCommand {
    /// List kiosks with filters.
    List(ListArgs),

    /// Register a new kiosk.
    Add(KioskFormArgs),

    /// Update an existing kiosk.
    Update {
        /// Kiosk id.
        id: String,
        #[command(flatten)]
        form: KioskFormArgs,
    },

    /// Set a kiosk's status (ACTIVE, INACTIVE, MAINTENANCE).
    SetStatus {
        /// Kiosk id.
        id: String,
        /// New status.
        status: String,
    },

    /// Quick-toggle a kiosk between ACTIVE and INACTIVE.
    Toggle {
        /// Kiosk id.
        id: String,
    },

    /// Delete a kiosk.
    Remove {
        /// Kiosk id.
        id: String,
    },

    /// Active, mapped kiosks nearest to a point.
    Nearest {
        /// Latitude of the reference point.
        #[arg(long)]
        lat: String,
        /// Longitude of the reference point.
        #[arg(long)]
        lng: String,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (1-based).
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Page size (defaults to the configured limit).
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Free-text search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Status filter: all, active, inactive, or maintenance.
    #[arg(long, default_value = "all")]
    pub status: String,
}

#[derive(Debug, Args)]
pub struct KioskFormArgs {
    /// Short kiosk label (e.g. K7). Upper-cased before persisting.
    #[arg(long = "number")]
    pub kiosk_number: String,

    /// Free-text place name.
    #[arg(long)]
    pub location: String,

    /// Latitude in decimal degrees.
    #[arg(long)]
    pub lat: String,

    /// Longitude in decimal degrees.
    #[arg(long)]
    pub lng: String,

    /// Status (defaults to ACTIVE).
    #[arg(long, default_value = "")]
    pub status: String,

    /// Current fill count.
    #[arg(long, default_value_t = 0)]
    pub capacity_current: i64,

    /// Maximum capacity.
    #[arg(long, default_value_t = 50)]
    pub capacity_max: i64,

    /// Opening time, HH:MM.
    #[arg(long)]
    pub open: Option<String>,

    /// Closing time, HH:MM.
    #[arg(long)]
    pub close: Option<String>,

    /// Optional free-text description.
    #[arg(long)]
    pub description: Option<String>,
}

// ── Ledgers ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LedgerListArgs {
    /// Page number (1-based).
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Page size (defaults to the configured limit).
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Free-text search.
    #[arg(short, long)]
    pub search: Option<String>,
}

// ── Config ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration.
    Show,

    /// Write a default config file.
    Init,

    /// Print the config file path.
    Path,
}

// ── Completions ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
