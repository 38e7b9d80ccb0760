//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.
//!
//! The subcommand is optional: a bare `firetrail` invocation runs `analyze`
//! with the configured defaults, matching the tool's original zero-argument
//! usage.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Firetrail -- firewall log extraction and filtering.
///
/// Use `firetrail <COMMAND> --help` for subcommand details. Without a
/// command, runs `analyze` against the configured log file.
#[derive(Parser, Debug)]
#[command(name = "firetrail", version, about, long_about = None)]
pub struct Cli {
    /// Path to the firetrail.toml configuration file.
    #[arg(short, long, default_value = "firetrail.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse the firewall log and render the record table plus the filtered view.
    Analyze(AnalyzeArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- analyze ----

/// Parse a firewall log into records and render them.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Log file to analyze (default: the configured `analyzer.log_file`).
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Filter predicate for the second view, as FIELD=VALUE
    /// (default: the configured predicate, `action=BLOCKED`).
    #[arg(long, value_name = "FIELD=VALUE")]
    pub filter: Option<String>,
}

// ---- config ----

/// Manage firetrail configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, analyzer).
        #[arg(long)]
        section: Option<String>,
    },
}
