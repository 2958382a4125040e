//! # CSV Reader
//!
//! Reads custom entries from a CSV file with one row per entry. The
//! `user_specified_system` and `group_id` columns are *fillable*: a blank cell
//! takes the value of the nearest non-blank cell above it, so a spreadsheet
//! exported with merged cells reads the same as one with every cell filled.
//!
//! Rows are grouped by system, then by group id, keeping the order in which
//! each value first appears. Rows sharing a system or group id do not have to
//! be contiguous.

use crate::error::{Error, Result};
use crate::model::{EntryGroup, RawEntry, SystemGrouping};
use crate::reader::{group_by_first_seen, non_blank};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const SYSTEM_COLUMN: &str = "user_specified_system";
pub const GROUP_ID_COLUMN: &str = "group_id";
pub const GROUP_NAME_COLUMN: &str = "group_name";
pub const DISPLAY_NAME_COLUMN: &str = "display_name";
pub const LINKED_RESOURCE_COLUMN: &str = "linked_resource";
pub const USER_SPECIFIED_TYPE_COLUMN: &str = "user_specified_type";
pub const DESCRIPTION_COLUMN: &str = "description";
pub const CREATED_AT_COLUMN: &str = "created_at";
pub const UPDATED_AT_COLUMN: &str = "updated_at";

/// Positions of the known columns in the header row.
#[derive(Debug)]
struct ColumnIndex {
    system: usize,
    group_id: usize,
    display_name: usize,
    linked_resource: usize,
    user_specified_type: usize,
    group_name: Option<usize>,
    description: Option<usize>,
    created_at: Option<usize>,
    updated_at: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |label: &str| headers.iter().position(|header| header == label);
        let required = |label: &str| {
            position(label).ok_or_else(|| Error::MissingColumn {
                column: label.to_string(),
            })
        };

        Ok(Self {
            system: required(SYSTEM_COLUMN)?,
            group_id: required(GROUP_ID_COLUMN)?,
            display_name: required(DISPLAY_NAME_COLUMN)?,
            linked_resource: required(LINKED_RESOURCE_COLUMN)?,
            user_specified_type: required(USER_SPECIFIED_TYPE_COLUMN)?,
            group_name: position(GROUP_NAME_COLUMN),
            description: position(DESCRIPTION_COLUMN),
            created_at: position(CREATED_AT_COLUMN),
            updated_at: position(UPDATED_AT_COLUMN),
        })
    }
}

/// A data row with its fillable columns already resolved.
#[derive(Debug)]
struct FilledRow {
    /// 1-based position among the data rows.
    number: usize,
    system: String,
    group_id: String,
    record: StringRecord,
}

impl FilledRow {
    fn cell(&self, index: usize) -> &str {
        self.record.get(index).unwrap_or("")
    }

    fn optional_cell(&self, index: Option<usize>) -> Option<String> {
        non_blank(index.map(|i| self.cell(i)))
    }

    fn mandatory_cell(&self, index: usize, field: &str) -> Result<String> {
        non_blank(Some(self.cell(index))).ok_or_else(|| Error::MissingValue {
            field: field.to_string(),
            location: format!("row {}", self.number),
        })
    }
}

/// Reader for the CSV input format.
pub struct CsvReader;

impl CsvReader {
    /// Reads custom entries from a CSV file.
    pub fn read_file(path: &Path) -> Result<Vec<SystemGrouping>> {
        info!("Reading the CSV file: {}", path.display());
        let file = File::open(path)?;
        Self::read_from(file)
    }

    /// Reads custom entries from any CSV byte source.
    pub fn read_from<R: Read>(reader: R) -> Result<Vec<SystemGrouping>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let records = csv_reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!("Loaded {} CSV data rows", records.len());

        let rows = forward_fill(&columns, records);
        assemble_systems(&columns, &rows)
    }
}

/// Resolves blank system and group id cells from the rows above them.
fn forward_fill(columns: &ColumnIndex, records: Vec<StringRecord>) -> Vec<FilledRow> {
    let mut last_system = String::new();
    let mut last_group_id = String::new();

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let system = record.get(columns.system).unwrap_or("");
            if !system.is_empty() {
                last_system = system.to_string();
            }
            let group_id = record.get(columns.group_id).unwrap_or("");
            if !group_id.is_empty() {
                last_group_id = group_id.to_string();
            }

            FilledRow {
                number: index + 1,
                system: last_system.clone(),
                group_id: last_group_id.clone(),
                record,
            }
        })
        .collect()
}

fn assemble_systems(columns: &ColumnIndex, rows: &[FilledRow]) -> Result<Vec<SystemGrouping>> {
    group_by_first_seen(rows, |row| row.system.as_str())
        .into_iter()
        .map(|(system_name, system_rows)| {
            let groups = group_by_first_seen(system_rows, |row| row.group_id.as_str())
                .into_iter()
                .map(|(group_id, group_rows)| {
                    make_group(columns, group_id, &group_rows, &system_name)
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(SystemGrouping {
                system_name,
                groups,
            })
        })
        .collect()
}

fn make_group(
    columns: &ColumnIndex,
    id: String,
    rows: &[&FilledRow],
    system_name: &str,
) -> Result<EntryGroup> {
    let name = rows
        .iter()
        .find_map(|row| row.optional_cell(columns.group_name));

    let entries = rows
        .iter()
        .map(|row| make_entry(columns, row, system_name))
        .collect::<Result<Vec<_>>>()?;

    Ok(EntryGroup { id, name, entries })
}

fn make_entry(columns: &ColumnIndex, row: &FilledRow, system_name: &str) -> Result<RawEntry> {
    Ok(RawEntry {
        linked_resource: row.mandatory_cell(columns.linked_resource, LINKED_RESOURCE_COLUMN)?,
        display_name: row.mandatory_cell(columns.display_name, DISPLAY_NAME_COLUMN)?,
        user_specified_type: row
            .mandatory_cell(columns.user_specified_type, USER_SPECIFIED_TYPE_COLUMN)?,
        user_specified_system: system_name.to_string(),
        description: row.optional_cell(columns.description),
        created_at: row.optional_cell(columns.created_at),
        updated_at: row.optional_cell(columns.updated_at),
    })
}
