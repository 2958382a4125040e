//! Shared test utilities for integration and E2E tests.
//!
//! This module provides entries-file fixtures and helpers to run the CLI
//! against a temporary directory.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_csv(inputs::CSV_TWO_SYSTEMS);
//!     fixture.sync_command().assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::inputs;
    pub use super::TestFixture;
}

/// Entries files used across tests.
#[allow(dead_code)]
pub mod inputs {
    /// Two systems; the second row of each relies on forward-fill.
    pub const CSV_TWO_SYSTEMS: &str = "\
user_specified_system,group_id,group_name,display_name,linked_resource,user_specified_type,description,created_at,updated_at
Sheets,finance,Finance,Q1 Report,//sheets/q1,spreadsheet,First quarter,2020-10-10T17:25:00-0300,2020-10-10T17:26:30-0300
,,,Q2 Report,//sheets/q2,spreadsheet,,,
Docs,legal,Legal,NDA Template,//docs/nda,document,,,
,,,Contract Draft,//docs/contract,document,Work in progress,,
";

    /// `CSV_TWO_SYSTEMS` without the Q2 Report row.
    pub const CSV_WITHOUT_Q2: &str = "\
user_specified_system,group_id,group_name,display_name,linked_resource,user_specified_type,description,created_at,updated_at
Sheets,finance,Finance,Q1 Report,//sheets/q1,spreadsheet,First quarter,2020-10-10T17:25:00-0300,2020-10-10T17:26:30-0300
Docs,legal,Legal,NDA Template,//docs/nda,document,,,
,,,Contract Draft,//docs/contract,document,Work in progress,,
";

    /// The same entries as `CSV_TWO_SYSTEMS`, in the nested JSON layout.
    pub const JSON_TWO_SYSTEMS: &str = r#"{
  "userSpecifiedSystems": [
    {
      "name": "Sheets",
      "entryGroups": [
        {
          "id": "finance",
          "name": "Finance",
          "entries": [
            {
              "displayName": "Q1 Report",
              "linkedResource": "//sheets/q1",
              "type": "spreadsheet",
              "description": "First quarter",
              "createdAt": "2020-10-10T17:25:00-0300",
              "updatedAt": "2020-10-10T17:26:30-0300"
            },
            {
              "displayName": "Q2 Report",
              "linkedResource": "//sheets/q2",
              "type": "spreadsheet"
            }
          ]
        }
      ]
    },
    {
      "name": "Docs",
      "entryGroups": [
        {
          "id": "legal",
          "name": "Legal",
          "entries": [
            {
              "displayName": "NDA Template",
              "linkedResource": "//docs/nda",
              "type": "document"
            },
            {
              "displayName": "Contract Draft",
              "linkedResource": "//docs/contract",
              "type": "document",
              "description": "Work in progress"
            }
          ]
        }
      ]
    }
  ]
}
"#;

    /// `JSON_TWO_SYSTEMS` with each system and group split over two objects.
    pub const JSON_REPEATED_SYSTEMS: &str = r#"{
  "userSpecifiedSystems": [
    {
      "name": "Sheets",
      "entryGroups": [
        {
          "id": "finance",
          "name": "Finance",
          "entries": [
            {
              "displayName": "Q1 Report",
              "linkedResource": "//sheets/q1",
              "type": "spreadsheet",
              "description": "First quarter",
              "createdAt": "2020-10-10T17:25:00-0300",
              "updatedAt": "2020-10-10T17:26:30-0300"
            }
          ]
        }
      ]
    },
    {
      "name": "Docs",
      "entryGroups": [
        {
          "id": "legal",
          "name": "Legal",
          "entries": [
            { "displayName": "NDA Template", "linkedResource": "//docs/nda", "type": "document" }
          ]
        },
        {
          "id": "legal",
          "entries": [
            {
              "displayName": "Contract Draft",
              "linkedResource": "//docs/contract",
              "type": "document",
              "description": "Work in progress"
            }
          ]
        }
      ]
    },
    {
      "name": "Sheets",
      "entryGroups": [
        {
          "id": "finance",
          "entries": [
            { "displayName": "Q2 Report", "linkedResource": "//sheets/q2", "type": "spreadsheet" }
          ]
        }
      ]
    }
  ]
}
"#;

    /// Missing the mandatory `linked_resource` column.
    pub const CSV_MISSING_COLUMN: &str = "\
user_specified_system,group_id,display_name,user_specified_type
Sheets,finance,Q1 Report,spreadsheet
";

    /// A timestamp in the unsupported `Z` form.
    pub const CSV_BAD_TIMESTAMP: &str = "\
user_specified_system,group_id,display_name,linked_resource,user_specified_type,created_at
Sheets,finance,Q1 Report,//sheets/q1,spreadsheet,2020-10-10T17:25:00Z
";

    /// Missing the top-level systems key.
    pub const JSON_MISSING_SYSTEMS: &str = r#"{"systems": []}"#;
}

/// A test fixture that provides a temporary directory holding an entries file
/// and the catalog file a `sync` writes.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_csv(inputs::CSV_TWO_SYSTEMS);
/// fixture.sync_command().assert().success();
/// assert_eq!(fixture.catalog_entries().len(), 4);
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub const CSV_FILE: &'static str = "entries.csv";
    pub const JSON_FILE: &'static str = "entries.json";
    pub const CATALOG_FILE: &'static str = "catalog.json";
    pub const PROJECT_ID: &'static str = "test-project";
    pub const LOCATION_ID: &'static str = "us-central1";

    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `entries.csv` with the given content.
    pub fn with_csv(self, content: &str) -> Self {
        self.with_file(Self::CSV_FILE, content)
    }

    /// Write `entries.json` with the given content.
    pub fn with_json(self, content: &str) -> Self {
        self.with_file(Self::JSON_FILE, content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn csv_path(&self) -> PathBuf {
        self.path().join(Self::CSV_FILE)
    }

    pub fn json_path(&self) -> PathBuf {
        self.path().join(Self::JSON_FILE)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.path().join(Self::CATALOG_FILE)
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Entries stored in the catalog file, as raw JSON values.
    pub fn catalog_entries(&self) -> Vec<Value> {
        let content =
            std::fs::read_to_string(self.catalog_path()).expect("Failed to read catalog file");
        let state: Value = serde_json::from_str(&content).expect("Catalog file is not JSON");
        state["entries"]
            .as_array()
            .cloned()
            .expect("Catalog file has no entries array")
    }

    /// Names of the entries stored in the catalog file.
    pub fn catalog_entry_names(&self) -> Vec<String> {
        self.catalog_entries()
            .iter()
            .filter_map(|entry| entry["name"].as_str().map(str::to_string))
            .collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Helpers to create CLI commands for the `datacatalog-custom-entries` binary.
///
/// Commands run inside the fixture directory, with color disabled and the
/// `DATACATALOG_*` environment variables cleared.
#[allow(dead_code)]
impl TestFixture {
    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("datacatalog-custom-entries");
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("DATACATALOG_PROJECT_ID")
            .env_remove("DATACATALOG_LOCATION_ID")
            .env_remove("DATACATALOG_CATALOG_FILE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// `sync` over `entries.csv` into `catalog.json`.
    pub fn sync_command(&self) -> assert_cmd::Command {
        self.sync_command_with("--csv-file", &self.csv_path())
    }

    /// `sync` over `entries.json` into `catalog.json`.
    pub fn sync_json_command(&self) -> assert_cmd::Command {
        self.sync_command_with("--json-file", &self.json_path())
    }

    fn sync_command_with(&self, input_flag: &str, input: &Path) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("sync")
            .arg(input_flag)
            .arg(input)
            .arg("--project-id")
            .arg(Self::PROJECT_ID)
            .arg("--location-id")
            .arg(Self::LOCATION_ID)
            .arg("--catalog-file")
            .arg(self.catalog_path());
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_csv() {
        let fixture = TestFixture::new().with_csv(inputs::CSV_TWO_SYSTEMS);
        assert!(fixture.csv_path().exists());
    }

    #[test]
    fn test_json_inputs_are_valid_json() {
        serde_json::from_str::<Value>(inputs::JSON_TWO_SYSTEMS).expect("fixture should be JSON");
        serde_json::from_str::<Value>(inputs::JSON_REPEATED_SYSTEMS)
            .expect("fixture should be JSON");
        serde_json::from_str::<Value>(inputs::JSON_MISSING_SYSTEMS)
            .expect("fixture should be JSON");
    }
}
