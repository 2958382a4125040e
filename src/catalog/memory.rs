//! In-memory catalog.

use super::{parent_group_path, CatalogClient, EntryFilter};
use crate::error::{Error, Result};
use crate::model::{CatalogEntry, CatalogEntryGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Serializable contents of a catalog, ordered by resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CatalogState {
    #[serde(default)]
    pub entry_groups: Vec<CatalogEntryGroup>,
    #[serde(default)]
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Default)]
struct Store {
    groups: BTreeMap<String, CatalogEntryGroup>,
    entries: BTreeMap<String, CatalogEntry>,
}

/// A catalog that keeps entry groups and entries in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    store: Mutex<Store>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-populated with the given entries.
    ///
    /// The parent entry group of every entry is created as well.
    pub fn with_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut store = Store::default();
        for entry in entries {
            if let Some(group_path) = parent_group_path(&entry.name) {
                store
                    .groups
                    .entry(group_path.to_string())
                    .or_insert_with(|| CatalogEntryGroup {
                        name: group_path.to_string(),
                        display_name: None,
                    });
            }
            store.entries.insert(entry.name.clone(), entry);
        }
        Self {
            store: Mutex::new(store),
        }
    }

    pub(crate) fn from_state(state: CatalogState) -> Self {
        let store = Store {
            groups: state
                .entry_groups
                .into_iter()
                .map(|group| (group.name.clone(), group))
                .collect(),
            entries: state
                .entries
                .into_iter()
                .map(|entry| (entry.name.clone(), entry))
                .collect(),
        };
        Self {
            store: Mutex::new(store),
        }
    }

    pub(crate) fn state(&self) -> Result<CatalogState> {
        let store = self.lock()?;
        Ok(CatalogState {
            entry_groups: store.groups.values().cloned().collect(),
            entries: store.entries.values().cloned().collect(),
        })
    }

    /// All entries, ordered by resource name.
    pub fn entries(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.lock()?.entries.values().cloned().collect())
    }

    /// All entry groups, ordered by resource name.
    pub fn entry_groups(&self) -> Result<Vec<CatalogEntryGroup>> {
        Ok(self.lock()?.groups.values().cloned().collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>> {
        self.store.lock().map_err(|_| Error::LockPoisoned {
            context: "memory catalog store".to_string(),
        })
    }
}

impl CatalogClient for MemoryCatalog {
    fn ensure_entry_group(&self, group: &CatalogEntryGroup) -> Result<bool> {
        let mut store = self.lock()?;
        if store.groups.contains_key(&group.name) {
            return Ok(false);
        }
        store.groups.insert(group.name.clone(), group.clone());
        Ok(true)
    }

    fn get_entry(&self, name: &str) -> Result<Option<CatalogEntry>> {
        Ok(self.lock()?.entries.get(name).cloned())
    }

    fn list_entries(&self, group_name: &str, filter: &EntryFilter) -> Result<Vec<CatalogEntry>> {
        let store = self.lock()?;
        Ok(store
            .entries
            .values()
            .filter(|entry| parent_group_path(&entry.name) == Some(group_name))
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect())
    }

    fn upsert_entry(&self, entry: &CatalogEntry) -> Result<()> {
        let mut store = self.lock()?;
        let group_name = parent_group_path(&entry.name).ok_or_else(|| Error::Catalog {
            operation: "upsert_entry".to_string(),
            message: format!("invalid entry name: {}", entry.name),
        })?;
        if !store.groups.contains_key(group_name) {
            return Err(Error::Catalog {
                operation: "upsert_entry".to_string(),
                message: format!("entry group not found: {}", group_name),
            });
        }
        store.entries.insert(entry.name.clone(), entry.clone());
        Ok(())
    }

    fn delete_entry(&self, name: &str) -> Result<()> {
        let mut store = self.lock()?;
        match store.entries.remove(name) {
            Some(_) => Ok(()),
            None => Err(Error::Catalog {
                operation: "delete_entry".to_string(),
                message: format!("entry not found: {}", name),
            }),
        }
    }
}
