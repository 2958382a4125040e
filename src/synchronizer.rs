//! # Synchronizer
//!
//! Orchestrates a synchronization run:
//!
//! 1. Read the input file with the reader matching its format.
//! 2. For every system, for every entry group with an id:
//!    - build the catalog entries through the `EntryFactory`;
//!    - delete the group's entries that are no longer in the input (scoped to
//!      the system with a `system=<name>` filter);
//!    - upsert the current entries, unless there are none.
//! 3. Return every synchronized entry, in system-then-group order.
//!
//! Groups are processed one at a time and cleanup always precedes ingestion.
//! The first error aborts the run; a group whose entries cannot all be built
//! is never touched in the catalog.

use crate::catalog::{CatalogClient, EntryFilter};
use crate::error::Result;
use crate::factory::EntryFactory;
use crate::model::{CatalogEntry, EntryGroup, SystemGrouping};
use crate::observer::{LogObserver, SyncObserver};
use crate::reader::{self, InputSource};
use crate::reconcile::{MetadataCleaner, MetadataIngestor};

/// Synchronizes custom entries into a catalog.
pub struct Synchronizer<'a> {
    factory: EntryFactory,
    catalog: &'a dyn CatalogClient,
    observer: Box<dyn SyncObserver + 'a>,
}

impl<'a> Synchronizer<'a> {
    /// Creates a synchronizer that reports progress through `log`.
    pub fn new(
        project_id: impl Into<String>,
        location_id: impl Into<String>,
        catalog: &'a dyn CatalogClient,
    ) -> Self {
        Self {
            factory: EntryFactory::new(project_id, location_id),
            catalog,
            observer: Box::new(LogObserver),
        }
    }

    /// Replaces the progress observer.
    pub fn with_observer(mut self, observer: Box<dyn SyncObserver + 'a>) -> Self {
        self.observer = observer;
        self
    }

    /// Reads `source` and synchronizes its contents.
    pub fn sync(&self, source: &InputSource) -> Result<Vec<CatalogEntry>> {
        self.observer.run_started(source);
        let systems = reader::read(source)?;
        self.observer.input_read(&systems);
        self.sync_groupings(&systems)
    }

    /// Synchronizes already-read input.
    pub fn sync_groupings(&self, systems: &[SystemGrouping]) -> Result<Vec<CatalogEntry>> {
        let mut synchronized = Vec::new();

        for system in systems {
            for group in &system.groups {
                if !group.has_id() {
                    self.observer
                        .group_skipped(&system.system_name, group.entries.len());
                    continue;
                }
                synchronized.extend(self.sync_group(&system.system_name, group)?);
            }
        }

        self.observer.run_finished(synchronized.len());
        Ok(synchronized)
    }

    fn sync_group(&self, system_name: &str, group: &EntryGroup) -> Result<Vec<CatalogEntry>> {
        self.observer
            .group_started(system_name, &group.id, group.entries.len());

        let entries = self.make_entries(group)?;

        let cleaner = MetadataCleaner::new(
            self.catalog,
            self.factory.project_id(),
            self.factory.location_id(),
        );
        let deleted =
            cleaner.delete_obsolete_metadata(&group.id, &entries, &EntryFilter::system(system_name))?;
        self.observer.cleanup_finished(&group.id, &deleted);

        if entries.is_empty() {
            self.observer.ingest_skipped(&group.id);
            return Ok(entries);
        }

        let ingestor = MetadataIngestor::new(
            self.catalog,
            self.factory.project_id(),
            self.factory.location_id(),
        );
        let stats = ingestor.ingest_metadata(&group.id, group.name.as_deref(), &entries)?;
        self.observer.ingest_finished(&group.id, &stats);

        Ok(entries)
    }

    fn make_entries(&self, group: &EntryGroup) -> Result<Vec<CatalogEntry>> {
        group
            .entries
            .iter()
            .map(|raw| {
                self.factory
                    .make_entry(&group.id, raw)
                    .map(|(_, entry)| entry)
            })
            .collect()
    }
}
