//! # JSON Reader
//!
//! Reads custom entries from a JSON document where containment is structural:
//!
//! ```json
//! { "userSpecifiedSystems": [
//!     { "name": "Sheets", "entryGroups": [
//!         { "id": "finance", "entries": [
//!             { "linkedResource": "//sheets/q1", "displayName": "Q1", "type": "sheet" }
//!         ] }
//!     ] }
//! ] }
//! ```
//!
//! Missing mandatory keys fail with `Error::MissingKey`, naming where in the
//! document the key was expected. String values are trimmed, like CSV cells.
//!
//! An entry's type is read from `type`; `userSpecifiedType` is accepted in its
//! place, but giving both is rejected with `Error::ConflictingKeys`.
//!
//! A system may appear more than once, and so may a group id within a system.
//! Repeats are merged in first-seen order, so the result has one grouping per
//! system name and one entry group per id, as the CSV reader produces.

use crate::error::{Error, Result};
use crate::model::{EntryGroup, RawEntry, SystemGrouping};
use crate::reader::{group_by_first_seen, non_blank};
use log::info;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

pub const SYSTEMS_FIELD: &str = "userSpecifiedSystems";
pub const SYSTEM_NAME_FIELD: &str = "name";
pub const ENTRY_GROUPS_FIELD: &str = "entryGroups";
pub const ENTRY_GROUP_ID_FIELD: &str = "id";
pub const ENTRIES_FIELD: &str = "entries";
pub const LINKED_RESOURCE_FIELD: &str = "linkedResource";
pub const DISPLAY_NAME_FIELD: &str = "displayName";
pub const USER_SPECIFIED_TYPE_FIELD: &str = "type";
pub const USER_SPECIFIED_TYPE_ALIAS: &str = "userSpecifiedType";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    user_specified_systems: Option<Vec<SystemDocument>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SystemDocument {
    name: Option<String>,
    entry_groups: Option<Vec<GroupDocument>>,
}

#[derive(Debug, Deserialize)]
struct GroupDocument {
    id: Option<String>,
    name: Option<String>,
    entries: Option<Vec<EntryDocument>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryDocument {
    linked_resource: Option<String>,
    display_name: Option<String>,
    #[serde(rename = "type")]
    entry_type: Option<String>,
    user_specified_type: Option<String>,
    description: Option<Value>,
    created_at: Option<Value>,
    updated_at: Option<Value>,
}

fn required<T>(value: Option<T>, key: &str, location: &str) -> Result<T> {
    value.ok_or_else(|| Error::MissingKey {
        key: key.to_string(),
        location: location.to_string(),
    })
}

fn required_string(value: Option<String>, key: &str, location: &str) -> Result<String> {
    let value = required(value, key, location)?;
    non_blank(Some(&value)).ok_or_else(|| Error::MissingValue {
        field: key.to_string(),
        location: location.to_string(),
    })
}

/// Resolves `type` against its `userSpecifiedType` spelling.
fn entry_type(entry_type: Option<String>, alias: Option<String>, location: &str) -> Result<String> {
    match (entry_type, alias) {
        (Some(_), Some(_)) => Err(Error::ConflictingKeys {
            keys: format!("'{}' and '{}'", USER_SPECIFIED_TYPE_FIELD, USER_SPECIFIED_TYPE_ALIAS),
            location: location.to_string(),
        }),
        (value, alias) => required_string(value.or(alias), USER_SPECIFIED_TYPE_FIELD, location),
    }
}

/// Only non-empty strings are copied; other JSON types are ignored.
fn optional_string(value: Option<Value>) -> Option<String> {
    non_blank(value.as_ref().and_then(Value::as_str))
}

/// Reader for the JSON input format.
pub struct JsonReader;

impl JsonReader {
    /// Reads custom entries from a JSON file.
    pub fn read_file(path: &Path) -> Result<Vec<SystemGrouping>> {
        info!("Reading the JSON file: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::read_str(&content)
    }

    /// Reads custom entries from a JSON string.
    pub fn read_str(content: &str) -> Result<Vec<SystemGrouping>> {
        let document: Document = serde_json::from_str(content)?;
        let systems = required(document.user_specified_systems, SYSTEMS_FIELD, "$")?;

        let systems = systems
            .into_iter()
            .enumerate()
            .map(|(index, system)| {
                make_system(system, &format!("{}[{}]", SYSTEMS_FIELD, index))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(merge_repeats(systems))
    }
}

/// Merges systems sharing a name, then groups sharing an id within a system.
fn merge_repeats(systems: Vec<SystemGrouping>) -> Vec<SystemGrouping> {
    group_by_first_seen(systems, |system| system.system_name.as_str())
        .into_iter()
        .map(|(system_name, parts)| {
            let groups = parts.into_iter().flat_map(|system| system.groups);
            let groups = group_by_first_seen(groups, |group| group.id.as_str())
                .into_iter()
                .map(|(id, parts)| merge_groups(id, parts))
                .collect();

            SystemGrouping {
                system_name,
                groups,
            }
        })
        .collect()
}

fn merge_groups(id: String, parts: Vec<EntryGroup>) -> EntryGroup {
    let mut merged = EntryGroup {
        id,
        name: None,
        entries: Vec::new(),
    };
    for part in parts {
        if merged.name.is_none() {
            merged.name = part.name;
        }
        merged.entries.extend(part.entries);
    }
    merged
}

fn make_system(system: SystemDocument, location: &str) -> Result<SystemGrouping> {
    let system_name = required_string(system.name, SYSTEM_NAME_FIELD, location)?;
    let groups = required(system.entry_groups, ENTRY_GROUPS_FIELD, location)?;

    let groups = groups
        .into_iter()
        .enumerate()
        .map(|(index, group)| {
            let location = format!("{}.{}[{}]", location, ENTRY_GROUPS_FIELD, index);
            make_group(group, &system_name, &location)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SystemGrouping {
        system_name,
        groups,
    })
}

fn make_group(group: GroupDocument, system_name: &str, location: &str) -> Result<EntryGroup> {
    let entries = required(group.entries, ENTRIES_FIELD, location)?;

    let entries = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let location = format!("{}.{}[{}]", location, ENTRIES_FIELD, index);
            make_entry(entry, system_name, &location)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(EntryGroup {
        id: group.id.map(|id| id.trim().to_string()).unwrap_or_default(),
        name: non_blank(group.name.as_deref()),
        entries,
    })
}

fn make_entry(entry: EntryDocument, system_name: &str, location: &str) -> Result<RawEntry> {
    Ok(RawEntry {
        linked_resource: required_string(entry.linked_resource, LINKED_RESOURCE_FIELD, location)?,
        display_name: required_string(entry.display_name, DISPLAY_NAME_FIELD, location)?,
        user_specified_type: entry_type(entry.entry_type, entry.user_specified_type, location)?,
        user_specified_system: system_name.to_string(),
        description: optional_string(entry.description),
        created_at: optional_string(entry.created_at),
        updated_at: optional_string(entry.updated_at),
    })
}
