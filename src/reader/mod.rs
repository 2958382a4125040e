//! # Input Readers
//!
//! Readers turn an input file into the canonical `Vec<SystemGrouping>` shape.
//! Two formats are supported:
//!
//! - **CSV** (`tabular::CsvReader`): flat rows, with the system and group id
//!   columns forward-filled to model merged spreadsheet cells.
//! - **JSON** (`hierarchical::JsonReader`): systems, entry groups, and entries nested
//!   structurally.
//!
//! The reader is chosen by the `InputSource` variant; `read` dispatches to it.

pub mod hierarchical;
pub mod tabular;

use crate::error::{Error, Result};
use crate::model::SystemGrouping;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which input format a file is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Csv,
    Json,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Csv => write!(f, "CSV"),
            InputKind::Json => write!(f, "JSON"),
        }
    }
}

/// An input file tagged with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Csv(PathBuf),
    Json(PathBuf),
}

impl InputSource {
    /// Builds an input source from optional CSV and JSON paths.
    ///
    /// Fails with `Error::NoInputProvided` when neither is given. When both
    /// are given the CSV file wins.
    pub fn from_paths(csv_file: Option<PathBuf>, json_file: Option<PathBuf>) -> Result<Self> {
        match (csv_file, json_file) {
            (Some(path), _) => Ok(InputSource::Csv(path)),
            (None, Some(path)) => Ok(InputSource::Json(path)),
            (None, None) => Err(Error::NoInputProvided),
        }
    }

    pub fn kind(&self) -> InputKind {
        match self {
            InputSource::Csv(_) => InputKind::Csv,
            InputSource::Json(_) => InputKind::Json,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            InputSource::Csv(path) | InputSource::Json(path) => path,
        }
    }
}

/// Reads the input file with the reader matching its format.
pub fn read(source: &InputSource) -> Result<Vec<SystemGrouping>> {
    match source {
        InputSource::Csv(path) => tabular::CsvReader::read_file(path),
        InputSource::Json(path) => hierarchical::JsonReader::read_file(path),
    }
}

/// Keeps a string, trimmed, only when it carries a value.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Groups items by key, keeping keys in first-seen order.
///
/// Items sharing a key do not have to be contiguous; each group keeps the
/// relative order of its items.
pub(crate) fn group_by_first_seen<T, F>(
    items: impl IntoIterator<Item = T>,
    key: F,
) -> Vec<(String, Vec<T>)>
where
    F: Fn(&T) -> &str,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<T>)> = Vec::new();

    for item in items {
        let position = match positions.get(key(&item)) {
            Some(&position) => position,
            None => {
                let k = key(&item).to_string();
                positions.insert(k.clone(), groups.len());
                groups.push((k, Vec::new()));
                groups.len() - 1
            }
        };
        groups[position].1.push(item);
    }

    groups
}
