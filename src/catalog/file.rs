//! JSON-file-backed catalog.
//!
//! The whole catalog is loaded when the file is opened and rewritten after
//! every mutation, so an aborted run leaves the file consistent with the
//! operations that did complete.

use super::memory::{CatalogState, MemoryCatalog};
use super::{CatalogClient, EntryFilter};
use crate::error::Result;
use crate::model::{CatalogEntry, CatalogEntryGroup};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// A catalog persisted as a JSON snapshot on disk.
#[derive(Debug)]
pub struct FileCatalog {
    path: PathBuf,
    inner: MemoryCatalog,
}

impl FileCatalog {
    /// Opens the catalog stored at `path`. A missing file is an empty catalog.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                CatalogState::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            CatalogState::default()
        };
        debug!(
            "Opened catalog file {} ({} entry groups, {} entries)",
            path.display(),
            state.entry_groups.len(),
            state.entries.len()
        );

        Ok(Self {
            path,
            inner: MemoryCatalog::from_state(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, ordered by resource name.
    pub fn entries(&self) -> Result<Vec<CatalogEntry>> {
        self.inner.entries()
    }

    /// All entry groups, ordered by resource name.
    pub fn entry_groups(&self) -> Result<Vec<CatalogEntryGroup>> {
        self.inner.entry_groups()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.inner.state()?)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl CatalogClient for FileCatalog {
    fn ensure_entry_group(&self, group: &CatalogEntryGroup) -> Result<bool> {
        let created = self.inner.ensure_entry_group(group)?;
        if created {
            self.persist()?;
        }
        Ok(created)
    }

    fn get_entry(&self, name: &str) -> Result<Option<CatalogEntry>> {
        self.inner.get_entry(name)
    }

    fn list_entries(&self, group_name: &str, filter: &EntryFilter) -> Result<Vec<CatalogEntry>> {
        self.inner.list_entries(group_name, filter)
    }

    fn upsert_entry(&self, entry: &CatalogEntry) -> Result<()> {
        self.inner.upsert_entry(entry)?;
        self.persist()
    }

    fn delete_entry(&self, name: &str) -> Result<()> {
        self.inner.delete_entry(name)?;
        self.persist()
    }
}
