//! Default values for the custom entries CLI.
//!
//! This module provides centralized default values and environment variable
//! names used across commands.

use std::path::PathBuf;

/// Environment variable holding the project id.
pub const PROJECT_ID_ENV: &str = "DATACATALOG_PROJECT_ID";

/// Environment variable holding the location id.
pub const LOCATION_ID_ENV: &str = "DATACATALOG_LOCATION_ID";

/// Environment variable holding the catalog file path.
pub const CATALOG_FILE_ENV: &str = "DATACATALOG_CATALOG_FILE";

/// File name of the local catalog when none is given.
pub const CATALOG_FILE_NAME: &str = "datacatalog-catalog.json";

/// Returns the default catalog file path, relative to the working directory.
///
/// This can be overridden by the `--catalog-file` CLI flag or the
/// `DATACATALOG_CATALOG_FILE` environment variable.
pub fn default_catalog_file() -> PathBuf {
    PathBuf::from(CATALOG_FILE_NAME)
}
