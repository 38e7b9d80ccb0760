//! Firetrail CLI entrypoint
//!
//! Wires argument parsing, tracing setup and command dispatch together.
//! All diagnostics go to stderr through tracing; rendered results are the
//! only stdout output.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;

use firetrail_analyzer::FiretrailConfig;

use crate::cli::{AnalyzeArgs, Cli, Commands};
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    init_tracing(&cli);

    let writer = OutputWriter::new(cli.output);

    // Bare invocation runs analyze with the configured defaults.
    let command = cli
        .command
        .unwrap_or(Commands::Analyze(AnalyzeArgs::default()));

    let result = match command {
        Commands::Analyze(args) => commands::analyze::execute(args, &cli.config, &writer),
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

/// Initialize the tracing subscriber on stderr.
///
/// Level priority: `--log-level` flag, then `general.log_level` from the
/// config file, then "info". Config errors are ignored here so that the
/// command handler can report them properly afterwards.
fn init_tracing(cli: &Cli) {
    let config = FiretrailConfig::load_or_default(&cli.config).unwrap_or_default();

    let level = cli
        .log_level
        .clone()
        .unwrap_or(config.general.log_level);
    let filter = tracing_subscriber::EnvFilter::new(level);

    if config.general.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
