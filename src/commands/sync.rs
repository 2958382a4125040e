//! # Sync Command Implementation
//!
//! This module implements the `sync` subcommand, which reads a CSV or JSON
//! entries file and synchronizes it into a JSON-file-backed catalog.
//!
//! ## Process
//!
//! 1. **Select Input**: Exactly one of `--csv-file` / `--json-file` names the
//!    entries file.
//! 2. **Open Catalog**: The catalog snapshot at `--catalog-file` is loaded; a
//!    missing file starts an empty catalog.
//! 3. **Synchronize**: Every entry group is cleaned up and then ingested. Progress
//!    is logged to stderr.
//! 4. **Report**: A per-system summary, or the synchronized entries as JSON with
//!    `--json`, is printed to stdout.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, ValueHint};
use std::collections::BTreeMap;
use std::path::PathBuf;

use datacatalog_custom_entries::catalog::FileCatalog;
use datacatalog_custom_entries::defaults::{
    CATALOG_FILE_ENV, CATALOG_FILE_NAME, LOCATION_ID_ENV, PROJECT_ID_ENV,
};
use datacatalog_custom_entries::model::CatalogEntry;
use datacatalog_custom_entries::output::{emoji, OutputConfig, Tone};
use datacatalog_custom_entries::reader::InputSource;
use datacatalog_custom_entries::synchronizer::Synchronizer;

/// Synchronize custom entries from a CSV or JSON file into the catalog
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["csv_file", "json_file"])
))]
pub struct SyncArgs {
    /// CSV file with one entry per row.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub csv_file: Option<PathBuf>,

    /// JSON file with systems, entry groups and entries.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub json_file: Option<PathBuf>,

    /// Project that owns the entry groups.
    #[arg(long, value_name = "ID", env = PROJECT_ID_ENV)]
    pub project_id: String,

    /// Location of the entry groups.
    #[arg(long, value_name = "ID", env = LOCATION_ID_ENV)]
    pub location_id: String,

    /// JSON file holding the catalog state.
    #[arg(
        long,
        value_name = "FILE",
        value_hint = ValueHint::FilePath,
        env = CATALOG_FILE_ENV,
        default_value = CATALOG_FILE_NAME
    )]
    pub catalog_file: PathBuf,

    /// Print the synchronized entries as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

/// Execute the `sync` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: SyncArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    require_non_blank("--project-id", &args.project_id)?;
    require_non_blank("--location-id", &args.location_id)?;

    let source = InputSource::from_paths(args.csv_file, args.json_file)?;
    if !source.path().exists() {
        anyhow::bail!("Input file not found: {}", source.path().display());
    }

    let catalog = FileCatalog::open(args.catalog_file.clone()).with_context(|| {
        format!(
            "Failed to open catalog file {}",
            args.catalog_file.display()
        )
    })?;

    let synchronizer = Synchronizer::new(&args.project_id, &args.location_id, &catalog);
    let entries = synchronizer
        .sync(&source)
        .with_context(|| format!("Failed to synchronize {}", source.path().display()))?;

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&entries).context("Failed to serialize entries")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!(
        "{} {} {} entries from {} file {}",
        emoji(&out, "✅", "[OK]"),
        out.paint(Tone::Success, "Synchronized"),
        entries.len(),
        source.kind(),
        source.path().display()
    );
    for (system, count) in count_by_system(&entries) {
        println!("   {}: {} entries", system, count);
    }
    println!(
        "{} Catalog: {}",
        emoji(&out, "📁", "[FILE]"),
        out.paint(Tone::Muted, &catalog.path().display().to_string())
    );

    Ok(())
}

fn require_non_blank(flag: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{} must not be empty", flag);
    }
    Ok(())
}

/// Counts entries per user-specified system, sorted by system name.
fn count_by_system(entries: &[CatalogEntry]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts
            .entry(entry.user_specified_system.as_str())
            .or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(system: &str) -> CatalogEntry {
        CatalogEntry {
            name: format!("projects/p/locations/l/entryGroups/g/entries/{}", system),
            linked_resource: "//r".to_string(),
            display_name: system.to_string(),
            description: None,
            user_specified_type: "t".to_string(),
            user_specified_system: system.to_string(),
            create_time_seconds: None,
            update_time_seconds: None,
        }
    }

    fn args(dir: &TempDir, csv: &str) -> SyncArgs {
        let csv_file = dir.path().join("entries.csv");
        std::fs::write(&csv_file, csv).unwrap();
        SyncArgs {
            csv_file: Some(csv_file),
            json_file: None,
            project_id: "p".to_string(),
            location_id: "l".to_string(),
            catalog_file: dir.path().join("catalog.json"),
            json: false,
        }
    }

    #[test]
    fn test_count_by_system_sorts_and_counts() {
        let entries = vec![entry("b"), entry("a"), entry("b")];
        let counts: Vec<_> = count_by_system(&entries).into_iter().collect();
        assert_eq!(counts, vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_require_non_blank() {
        assert!(require_non_blank("--project-id", "p").is_ok());
        let err = require_non_blank("--project-id", "  ").unwrap_err();
        assert!(err.to_string().contains("--project-id"));
    }

    #[test]
    fn test_execute_writes_catalog_file() {
        let dir = TempDir::new().unwrap();
        let args = args(
            &dir,
            "user_specified_system,group_id,display_name,linked_resource,user_specified_type\n\
             Sheets,finance,Q1 Report,//sheets/q1,spreadsheet\n",
        );
        let catalog_file = args.catalog_file.clone();

        execute(args, "never").unwrap();

        let catalog = FileCatalog::open(catalog_file).unwrap();
        let entries = catalog.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].name,
            "projects/p/locations/l/entryGroups/finance/entries/q1_report"
        );
    }

    #[test]
    fn test_execute_missing_input_fails() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir, "");
        args.csv_file = Some(dir.path().join("missing.csv"));

        let err = execute(args, "never").unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }

    #[test]
    fn test_execute_blank_project_fails() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir, "");
        args.project_id = " ".to_string();

        assert!(execute(args, "never").is_err());
    }
}
