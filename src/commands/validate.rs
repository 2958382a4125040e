//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks an entries
//! file without touching any catalog.
//!
//! ## Functionality
//!
//! - **Schema Validation**: Reads the file with the CSV or JSON reader, which
//!   rejects missing columns, missing keys and blank mandatory values.
//! - **Entry Validation**: Builds every entry through the entry factory, which
//!   checks mandatory fields and timestamp formats.
//! - **Summary**: Prints the systems, entry groups and entry ids that a `sync`
//!   would write.
//!
//! This command is a safe, read-only operation. It stops at the first error.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, ValueHint};
use std::path::PathBuf;

use datacatalog_custom_entries::defaults::{LOCATION_ID_ENV, PROJECT_ID_ENV};
use datacatalog_custom_entries::error::Error;
use datacatalog_custom_entries::factory::EntryFactory;
use datacatalog_custom_entries::model::SystemGrouping;
use datacatalog_custom_entries::output::{emoji, OutputConfig, Tone};
use datacatalog_custom_entries::reader::{self, InputSource};

/// Read an entries file and check it without touching the catalog
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["csv_file", "json_file"])
))]
pub struct ValidateArgs {
    /// CSV file with one entry per row.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub csv_file: Option<PathBuf>,

    /// JSON file with systems, entry groups and entries.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub json_file: Option<PathBuf>,

    /// Project used to build entry names.
    #[arg(long, value_name = "ID", env = PROJECT_ID_ENV, default_value = "validate")]
    pub project_id: String,

    /// Location used to build entry names.
    #[arg(long, value_name = "ID", env = LOCATION_ID_ENV, default_value = "validate")]
    pub location_id: String,

    /// List every entry id, not only the per-group counts.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Counts gathered while validating.
#[derive(Debug, Default, PartialEq, Eq)]
struct ValidationSummary {
    systems: usize,
    groups: usize,
    skipped_groups: usize,
    entries: usize,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let source = InputSource::from_paths(args.csv_file, args.json_file)?;
    println!(
        "{} Validating {} file: {}",
        emoji(&out, "🔍", "[SCAN]"),
        source.kind(),
        source.path().display()
    );

    let systems = match reader::read(&source) {
        Ok(systems) => {
            println!(
                "{} {} file parsed successfully",
                emoji(&out, "✅", "[OK]"),
                source.kind()
            );
            systems
        }
        Err(e) => {
            println!(
                "{} {}: {}",
                emoji(&out, "❌", "[ERR]"),
                out.paint(Tone::Error, reading_error_label(&e)),
                e
            );
            return Err(e).with_context(|| format!("Failed to read {}", source.path().display()));
        }
    };

    let factory = EntryFactory::new(&args.project_id, &args.location_id);
    let summary = match validate_entries(&factory, &systems, &out, args.verbose) {
        Ok(summary) => summary,
        Err(e) => {
            println!(
                "{} {}: {}",
                emoji(&out, "❌", "[ERR]"),
                out.paint(Tone::Error, "Invalid entry"),
                e
            );
            return Err(e);
        }
    };

    println!("\n{} Summary:", emoji(&out, "📊", "[INFO]"));
    println!("   Systems: {}", summary.systems);
    println!("   Entry groups: {}", summary.groups);
    if summary.skipped_groups > 0 {
        println!(
            "   {} {}",
            out.paint(Tone::Warning, "Groups without id (skipped by sync):"),
            summary.skipped_groups
        );
    }
    println!("   Entries: {}", summary.entries);
    println!(
        "\n{} {}",
        emoji(&out, "✅", "[OK]"),
        out.paint(Tone::Success, "Validation passed")
    );

    Ok(())
}

/// Names the kind of problem that stopped the input from being read.
fn reading_error_label(error: &Error) -> &'static str {
    if error.is_schema_error() {
        "Unexpected file layout"
    } else if error.is_validation_error() {
        "Invalid value"
    } else {
        "Reading failed"
    }
}

fn validate_entries(
    factory: &EntryFactory,
    systems: &[SystemGrouping],
    out: &OutputConfig,
    verbose: bool,
) -> Result<ValidationSummary> {
    let mut summary = ValidationSummary {
        systems: systems.len(),
        ..Default::default()
    };

    for system in systems {
        println!("\n   System '{}':", system.system_name);
        for group in &system.groups {
            if !group.has_id() {
                println!(
                    "   {} group without id: {} entries",
                    emoji(out, "⚠️", "[WARN]"),
                    group.entries.len()
                );
                summary.skipped_groups += 1;
                continue;
            }

            summary.groups += 1;
            println!("     {}: {} entries", group.id, group.entries.len());
            for raw in &group.entries {
                let (entry_id, _) = factory.make_entry(&group.id, raw).with_context(|| {
                    format!(
                        "Entry '{}' in group '{}' of system '{}'",
                        raw.display_name, group.id, system.system_name
                    )
                })?;
                if verbose {
                    println!("       - {}", entry_id);
                }
                summary.entries += 1;
            }
        }
    }

    Ok(summary)
}
