//! # Catalog Collaborator
//!
//! The synchronizer talks to the metadata catalog only through the
//! `CatalogClient` trait, so the backing store can be swapped out. Two
//! implementations ship with the crate:
//!
//! - **`MemoryCatalog`**: keeps everything in memory. Used by tests and by
//!   library callers that want to inspect the outcome of a sync.
//! - **`FileCatalog`**: persists the catalog as a JSON snapshot on disk. Used by
//!   the command-line tool.
//!
//! This module also owns the resource naming convention and the `EntryFilter`
//! that scopes cleanup to a single user specified system.

mod file;
mod memory;

pub use file::FileCatalog;
pub use memory::MemoryCatalog;

use crate::error::{Error, Result};
use crate::model::{CatalogEntry, CatalogEntryGroup};
use std::fmt;

/// Operations the synchronizer needs from a metadata catalog.
///
/// Implementations must be idempotent on entry name: upserting the same entry
/// twice leaves a single entry behind.
pub trait CatalogClient: Send + Sync {
    /// Creates the entry group if it does not exist yet.
    ///
    /// Returns `true` when the group was created by this call.
    fn ensure_entry_group(&self, group: &CatalogEntryGroup) -> Result<bool>;

    /// Looks up an entry by its full resource name.
    fn get_entry(&self, name: &str) -> Result<Option<CatalogEntry>>;

    /// Lists the entries of an entry group that match `filter`.
    fn list_entries(&self, group_name: &str, filter: &EntryFilter) -> Result<Vec<CatalogEntry>>;

    /// Creates the entry, or replaces it if an entry with the same name exists.
    fn upsert_entry(&self, entry: &CatalogEntry) -> Result<()>;

    /// Deletes an entry by its full resource name.
    fn delete_entry(&self, name: &str) -> Result<()>;
}

/// Resource name of an entry group.
pub fn entry_group_path(project_id: &str, location_id: &str, group_id: &str) -> String {
    format!(
        "projects/{}/locations/{}/entryGroups/{}",
        project_id, location_id, group_id
    )
}

/// Resource name of an entry.
pub fn entry_path(project_id: &str, location_id: &str, group_id: &str, entry_id: &str) -> String {
    format!(
        "{}/entries/{}",
        entry_group_path(project_id, location_id, group_id),
        entry_id
    )
}

/// Returns the entry group resource name an entry name belongs to.
pub fn parent_group_path(entry_name: &str) -> Option<&str> {
    entry_name
        .rsplit_once("/entries/")
        .map(|(group_path, _)| group_path)
}

/// Scopes catalog listings, rendered as `system=<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFilter {
    /// Matches every entry.
    All,
    /// Matches entries owned by the given user specified system.
    System(String),
}

impl EntryFilter {
    pub fn system(name: impl Into<String>) -> Self {
        EntryFilter::System(name.into())
    }

    /// Parses a filter expression. An empty expression matches everything.
    pub fn parse(expression: &str) -> Result<Self> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Ok(EntryFilter::All);
        }

        match expression.split_once('=') {
            Some((key, value)) if key.trim() == "system" && !value.trim().is_empty() => {
                Ok(EntryFilter::System(value.trim().to_string()))
            }
            _ => Err(Error::InvalidFilter {
                expression: expression.to_string(),
            }),
        }
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            EntryFilter::All => true,
            EntryFilter::System(system) => entry.user_specified_system == *system,
        }
    }
}

impl fmt::Display for EntryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryFilter::All => Ok(()),
            EntryFilter::System(system) => write!(f, "system={}", system),
        }
    }
}
