//! # Custom Entries Library
//!
//! This library synchronizes custom catalog entries, described in a CSV or a
//! JSON file, into a metadata catalog. It backs the
//! `datacatalog-custom-entries` command-line tool but can be used on its own
//! with any `CatalogClient` implementation.
//!
//! ## Quick Example
//!
//! ```
//! use datacatalog_custom_entries::catalog::MemoryCatalog;
//! use datacatalog_custom_entries::observer::NoopObserver;
//! use datacatalog_custom_entries::reader::tabular::CsvReader;
//! use datacatalog_custom_entries::synchronizer::Synchronizer;
//!
//! let csv = "user_specified_system,group_id,display_name,linked_resource,user_specified_type\n\
//!            Sheets,finance,Q1 Report,//sheets/q1,spreadsheet\n\
//!            ,,Q2 Report,//sheets/q2,spreadsheet\n";
//! let systems = CsvReader::read_from(csv.as_bytes()).unwrap();
//!
//! let catalog = MemoryCatalog::new();
//! let synchronizer = Synchronizer::new("my-project", "us", &catalog)
//!     .with_observer(Box::new(NoopObserver));
//! let entries = synchronizer.sync_groupings(&systems).unwrap();
//!
//! assert_eq!(entries.len(), 2);
//! assert_eq!(
//!     entries[0].name,
//!     "projects/my-project/locations/us/entryGroups/finance/entries/q1_report"
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Model (`model`)**: the canonical `SystemGrouping` / `EntryGroup` /
//!   `RawEntry` shape both readers produce, and the `CatalogEntry` records
//!   stored in the catalog.
//! - **Readers (`reader`)**: CSV input with forward-filled system and group
//!   columns, and nested JSON input.
//! - **Entry factory (`factory`)**: derives stable entry ids from display names
//!   and maps raw entries to catalog entries.
//! - **Catalog (`catalog`)**: the `CatalogClient` trait with in-memory and
//!   JSON-file implementations.
//! - **Reconciliation (`reconcile`)**: deleting obsolete entries and upserting
//!   current ones for a single entry group.
//! - **Synchronizer (`synchronizer`)**: runs the whole pipeline, reporting
//!   progress to a `SyncObserver` (`observer`).

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod factory;
pub mod model;
pub mod observer;
pub mod output;
pub mod reader;
pub mod reconcile;
pub mod synchronizer;

#[cfg(test)]
mod factory_proptest;
