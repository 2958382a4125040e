//! # Data Catalog Custom Entries CLI
//!
//! This is the binary entry point for the `datacatalog-custom-entries`
//! command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Handling top-level application errors and translating them into user-friendly
//!   output.
//!
//! The synchronization logic lives in the `datacatalog_custom_entries` library;
//! the binary only wires arguments, logging and terminal output around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
