//! Clap derive structures for the `thetalake` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept free
//! of crate-internal imports so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// thetalake -- drive Theta Lake resource lifecycles from the command line
#[derive(Debug, Parser)]
#[command(
    name = "thetalake",
    version,
    about = "Manage Theta Lake compliance resources from the command line",
    long_about = "Runs create/read/update/delete/import for Theta Lake resources and\n\
        reads the reporting data sources. Records are exchanged as JSON.",
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
    /// Tenant profile to use
    #[arg(long, short = 'p', env = "THETALAKE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API endpoint URL (overrides profile)
    #[arg(long, short = 'e', env = "THETALAKE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// API bearer token (overrides profile)
    #[arg(long, env = "THETALAKE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "THETALAKE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Path to the config file
    #[arg(long, env = "THETALAKE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format [default: from config, else json]
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Pretty table
    Table,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Run a lifecycle operation on a managed resource
    #[command(alias = "res", alias = "r")]
    Resource(ResourceArgs),

    /// Read a data source
    #[command(alias = "d")]
    Data(DataArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Resource ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// Resource kind
    #[arg(value_enum)]
    pub kind: ResourceKind,

    #[command(subcommand)]
    pub action: ResourceAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Case,
    CaseRecord,
    User,
    DirectoryGroup,
    RetentionPolicy,
    LegalHold,
    Tag,
    Export,
    Record,
    IntegrationState,
}

#[derive(Debug, Subcommand)]
pub enum ResourceAction {
    /// Create from a planned record
    Create {
        /// JSON file with the planned record ("-" for stdin)
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Refresh a stored record from the service
    Read {
        /// JSON file with the stored record ("-" for stdin)
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Apply a planned record over a stored one
    Update {
        /// JSON file with the planned record ("-" for stdin)
        #[arg(long, short = 'f')]
        file: PathBuf,

        /// JSON file with the stored record
        #[arg(long)]
        prior: PathBuf,
    },

    /// Delete the entity behind a stored record
    Delete {
        /// JSON file with the stored record ("-" for stdin)
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Adopt an existing entity by id, then read it
    Import {
        /// Identifier of the existing entity
        id: String,
    },
}

// ── Data ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DataArgs {
    /// Data source to read
    #[arg(value_enum)]
    pub source: DataSource,

    /// Identifier, for sources that look up a single entity
    pub id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataSource {
    AuditLogs,
    Events,
    AnalysisPolicies,
    PolicyHits,
    SystemStatus,
    Analysis,
    Case,
    User,
    DirectoryGroup,
    RetentionPolicy,
    LegalHold,
    Tag,
    Export,
    Record,
    IntegrationState,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with guided setup
    Init,

    /// Display the current configuration (tokens redacted)
    Show,

    /// Store a profile's API token in the system keyring
    SetToken {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
