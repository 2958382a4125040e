//! # Reconciliation
//!
//! The two halves of a group reconciliation:
//!
//! - **`MetadataCleaner`** deletes catalog entries of a group that are no
//!   longer part of the current batch. Only entries matching the scoping
//!   filter are candidates, so entries another system keeps in the same group
//!   survive.
//! - **`MetadataIngestor`** makes sure the entry group exists and upserts the
//!   current batch, leaving identical entries untouched.

use crate::catalog::{entry_group_path, CatalogClient, EntryFilter};
use crate::error::Result;
use crate::model::{CatalogEntry, CatalogEntryGroup};
use log::debug;
use std::collections::HashSet;

/// Deletes obsolete entries from the catalog.
pub struct MetadataCleaner<'a> {
    catalog: &'a dyn CatalogClient,
    project_id: &'a str,
    location_id: &'a str,
}

impl<'a> MetadataCleaner<'a> {
    pub fn new(catalog: &'a dyn CatalogClient, project_id: &'a str, location_id: &'a str) -> Self {
        Self {
            catalog,
            project_id,
            location_id,
        }
    }

    /// Deletes every entry of `group_id` that matches `filter` and is not in
    /// `current`. Returns the names of the deleted entries.
    pub fn delete_obsolete_metadata(
        &self,
        group_id: &str,
        current: &[CatalogEntry],
        filter: &EntryFilter,
    ) -> Result<Vec<String>> {
        let group_name = entry_group_path(self.project_id, self.location_id, group_id);
        let current_names: HashSet<&str> = current.iter().map(|e| e.name.as_str()).collect();

        let obsolete: Vec<String> = self
            .catalog
            .list_entries(&group_name, filter)?
            .into_iter()
            .map(|entry| entry.name)
            .filter(|name| !current_names.contains(name.as_str()))
            .collect();

        for name in &obsolete {
            debug!("Deleting obsolete entry: {}", name);
            self.catalog.delete_entry(name)?;
        }

        Ok(obsolete)
    }
}

/// Counts of what an ingestion did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Whether the entry group had to be created.
    pub group_created: bool,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl IngestStats {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.unchanged
    }
}

/// Writes the current batch of entries into the catalog.
pub struct MetadataIngestor<'a> {
    catalog: &'a dyn CatalogClient,
    project_id: &'a str,
    location_id: &'a str,
}

impl<'a> MetadataIngestor<'a> {
    pub fn new(catalog: &'a dyn CatalogClient, project_id: &'a str, location_id: &'a str) -> Self {
        Self {
            catalog,
            project_id,
            location_id,
        }
    }

    /// Ensures the entry group exists, then upserts every changed entry.
    pub fn ingest_metadata(
        &self,
        group_id: &str,
        group_display_name: Option<&str>,
        entries: &[CatalogEntry],
    ) -> Result<IngestStats> {
        let group = CatalogEntryGroup {
            name: entry_group_path(self.project_id, self.location_id, group_id),
            display_name: group_display_name.map(str::to_string),
        };

        let mut stats = IngestStats {
            group_created: self.catalog.ensure_entry_group(&group)?,
            ..Default::default()
        };

        for entry in entries {
            match self.catalog.get_entry(&entry.name)? {
                Some(existing) if existing == *entry => {
                    debug!("Entry unchanged: {}", entry.name);
                    stats.unchanged += 1;
                }
                Some(_) => {
                    debug!("Updating entry: {}", entry.name);
                    self.catalog.upsert_entry(entry)?;
                    stats.updated += 1;
                }
                None => {
                    debug!("Creating entry: {}", entry.name);
                    self.catalog.upsert_entry(entry)?;
                    stats.created += 1;
                }
            }
        }

        Ok(stats)
    }
}
