//! # Sync Observer
//!
//! The synchronizer reports progress through the `SyncObserver` trait instead
//! of logging directly, so callers decide what a run looks like from the
//! outside. Every callback has an empty default implementation.
//!
//! - **`LogObserver`** (the default) emits `log` records.
//! - **`NoopObserver`** ignores everything.

use crate::model::SystemGrouping;
use crate::reader::InputSource;
use crate::reconcile::IngestStats;
use log::{debug, info, warn};

/// Callbacks invoked by the synchronizer, in run order.
pub trait SyncObserver {
    fn run_started(&self, _source: &InputSource) {}

    fn input_read(&self, _systems: &[SystemGrouping]) {}

    /// A group without an id was skipped.
    fn group_skipped(&self, _system_name: &str, _entry_count: usize) {}

    fn group_started(&self, _system_name: &str, _group_id: &str, _entry_count: usize) {}

    fn cleanup_finished(&self, _group_id: &str, _deleted: &[String]) {}

    /// Ingestion was skipped because the group has no entries.
    fn ingest_skipped(&self, _group_id: &str) {}

    fn ingest_finished(&self, _group_id: &str, _stats: &IngestStats) {}

    fn run_finished(&self, _synchronized: usize) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}

/// Observer that reports progress through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SyncObserver for LogObserver {
    fn run_started(&self, source: &InputSource) {
        info!(
            "Synchronize custom entries to {} [STARTED]: {}",
            source.kind(),
            source.path().display()
        );
    }

    fn input_read(&self, systems: &[SystemGrouping]) {
        let groups: usize = systems.iter().map(|s| s.groups.len()).sum();
        let entries: usize = systems.iter().map(SystemGrouping::entry_count).sum();
        info!(
            "Read {} systems, {} entry groups, {} entries",
            systems.len(),
            groups,
            entries
        );
    }

    fn group_skipped(&self, system_name: &str, entry_count: usize) {
        warn!(
            "Skipping entry group without id in system '{}' ({} entries)",
            system_name, entry_count
        );
    }

    fn group_started(&self, system_name: &str, group_id: &str, entry_count: usize) {
        info!(
            "Processing entry group '{}' of system '{}' ({} entries)",
            group_id, system_name, entry_count
        );
    }

    fn cleanup_finished(&self, group_id: &str, deleted: &[String]) {
        info!(
            "Deleted {} obsolete entries from entry group '{}'",
            deleted.len(),
            group_id
        );
    }

    fn ingest_skipped(&self, group_id: &str) {
        debug!("No entries to ingest into entry group '{}'", group_id);
    }

    fn ingest_finished(&self, group_id: &str, stats: &IngestStats) {
        if stats.group_created {
            info!("Created entry group '{}'", group_id);
        }
        info!(
            "Ingested entry group '{}': {} created, {} updated, {} unchanged",
            group_id, stats.created, stats.updated, stats.unchanged
        );
    }

    fn run_finished(&self, synchronized: usize) {
        info!(
            "Synchronize custom entries [FINISHED]: {} entries synchronized",
            synchronized
        );
    }
}
