//! CLI argument parsing and command dispatch

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::commands;

/// Data Catalog custom entries - Synchronize CSV and JSON entry files into a catalog
#[derive(Parser, Debug)]
#[command(name = "datacatalog-custom-entries")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(
        long,
        global = true,
        value_name = "WHEN",
        default_value = "auto",
        value_parser = ["always", "never", "auto"]
    )]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Synchronize custom entries from a CSV or JSON file into the catalog
    Sync(commands::sync::SyncArgs),

    /// Read an entries file and check it without touching the catalog
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level)?;

        match self.command {
            Commands::Sync(args) => commands::sync::execute(args, &self.color),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Initializes `env_logger` from the `--log-level` value.
///
/// `RUST_LOG` still wins when set, so module-level filters keep working.
fn init_logging(level: &str) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder
        .format_timestamp(None)
        .try_init()
        .context("Failed to initialize logging")
}
