//! # Canonical Record Model
//!
//! Value types shared by the readers, the entry factory, and the catalog.
//!
//! - **`RawEntry`**, **`EntryGroup`**, **`SystemGrouping`**: the canonical shape
//!   both readers produce, regardless of whether the input was flat CSV or
//!   nested JSON.
//! - **`CatalogEntry`**, **`CatalogEntryGroup`**: the records stored in the
//!   catalog. They serialize with camelCase field names and omit unset
//!   optional fields.

use serde::{Deserialize, Serialize};

/// An entry as read from the input file, before any catalog mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    /// URI of the external asset this entry describes.
    pub linked_resource: String,
    /// Human-readable label. The entry id is derived from it.
    pub display_name: String,
    pub user_specified_type: String,
    /// Name of the owning system, copied from the enclosing grouping.
    pub user_specified_system: String,
    pub description: Option<String>,
    /// Source creation time in `%Y-%m-%dT%H:%M:%S%z` format.
    pub created_at: Option<String>,
    /// Source update time in `%Y-%m-%dT%H:%M:%S%z` format.
    pub updated_at: Option<String>,
}

/// A collection of entries sharing an entry group id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryGroup {
    /// Entry group id. Empty when the input could not resolve it.
    pub id: String,
    /// Optional display name for the entry group.
    pub name: Option<String>,
    pub entries: Vec<RawEntry>,
}

impl EntryGroup {
    /// Returns true when the group carries no usable id and must be skipped.
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

/// All entry groups owned by one user specified system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemGrouping {
    pub system_name: String,
    pub groups: Vec<EntryGroup>,
}

impl SystemGrouping {
    /// Total number of raw entries across every group of this system.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }
}

/// An entry record as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Full resource name:
    /// `projects/{p}/locations/{l}/entryGroups/{g}/entries/{e}`.
    pub name: String,
    pub linked_resource: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_specified_type: String,
    pub user_specified_system: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time_seconds: Option<i64>,
}

/// An entry group record as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryGroup {
    /// Full resource name: `projects/{p}/locations/{l}/entryGroups/{g}`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}
