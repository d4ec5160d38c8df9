//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use dp_core::MessageTs;

/// Dawnpost - schema migrations and daily-update state for the Dawnpost bot
#[derive(Parser, Debug)]
#[command(name = "dp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override database path (`:memory:` for an in-memory store)
    #[arg(long, global = true, env = "DAWNPOST_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending migrations
    Migrate(MigrateArgs),

    /// Show applied, pending and orphaned migrations
    Status(StatusArgs),

    /// Create a new, empty migration file
    New(NewArgs),

    /// Query or record daily updates
    #[command(subcommand)]
    Updates(UpdatesCommand),
}

/// Where migration units come from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Migrations directory (default: migrations.path from config)
    #[arg(long, conflicts_with = "builtin")]
    pub dir: Option<String>,

    /// Use the migrations compiled into this binary
    #[arg(long)]
    pub builtin: bool,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Short description, used for the file name
    pub description: String,

    /// Migrations directory (default: migrations.path from config)
    #[arg(long)]
    pub dir: Option<String>,
}

/// Daily-update subcommands
#[derive(Subcommand, Debug)]
pub enum UpdatesCommand {
    /// Show the most recent daily update
    Latest {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a posted daily update by message timestamp
    Record {
        /// Message timestamp, e.g. 1709913600.000100
        #[arg(value_parser = parse_message_ts)]
        ts: MessageTs,
    },

    /// Exit 0 if the thread root is a daily update, 1 otherwise
    Check {
        /// Thread root timestamp
        #[arg(value_parser = parse_message_ts)]
        ts: MessageTs,
    },
}

fn parse_message_ts(value: &str) -> Result<MessageTs, String> {
    MessageTs::parse(value).map_err(|e| e.to_string())
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
