//! # Entry Factory
//!
//! Maps canonical `RawEntry` values to `CatalogEntry` records.
//!
//! The entry id is derived from the display name only, so the same display
//! name always lands on the same catalog entry. Re-running a sync with
//! unchanged input therefore updates entries in place instead of creating
//! duplicates.
//!
//! The factory is the validation boundary for mandatory fields: any blank
//! mandatory value fails here even if a reader let it through.

use crate::catalog::entry_path;
use crate::error::{Error, Result};
use crate::model::{CatalogEntry, RawEntry};
use chrono::DateTime;
use regex::Regex;
use std::sync::LazyLock;

/// Format of the `created_at` and `updated_at` source timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Longest entry id the catalog accepts.
pub const ENTRY_ID_MAX_LENGTH: usize = 64;

/// Longest display name (in bytes) the catalog accepts.
pub const DISPLAY_NAME_MAX_BYTES: usize = 200;

static INVALID_ID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid entry id pattern"));

static INVALID_DISPLAY_NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{L}\p{N}_\- ]").expect("valid display name pattern")
});

/// Formats a string as a catalog id.
///
/// Characters outside `[a-zA-Z0-9_]` become `_`, an id starting with a digit
/// gets a leading `_`, and the result is cut to `ENTRY_ID_MAX_LENGTH`.
pub fn format_id(source: &str) -> String {
    let mut id = INVALID_ID_CHARS.replace_all(source, "_").into_owned();
    if id.starts_with(|c: char| c.is_ascii_digit()) {
        id.insert(0, '_');
    }
    // only ASCII is left, so byte length equals char count
    id.truncate(ENTRY_ID_MAX_LENGTH);
    id
}

/// Formats a string as a catalog display name.
///
/// Keeps letters, digits, `_`, `-` and spaces; anything else becomes `_`. The
/// result is cut to `DISPLAY_NAME_MAX_BYTES` on a character boundary.
pub fn format_display_name(source: &str) -> String {
    let mut name = INVALID_DISPLAY_NAME_CHARS
        .replace_all(source, "_")
        .into_owned();
    if name.len() > DISPLAY_NAME_MAX_BYTES {
        let mut end = DISPLAY_NAME_MAX_BYTES;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }
    name
}

/// Parses a source timestamp into epoch seconds.
pub fn parse_timestamp(field: &str, value: &str) -> Result<i64> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|datetime| datetime.timestamp())
        .map_err(|e| Error::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
            message: e.to_string(),
        })
}

/// Derives the entry id for a display name.
pub fn make_entry_id(display_name: &str) -> String {
    format_id(&display_name.to_lowercase())
}

fn mandatory<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::MissingField {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Builds catalog entries for one project and location.
#[derive(Debug, Clone)]
pub struct EntryFactory {
    project_id: String,
    location_id: String,
}

impl EntryFactory {
    pub fn new(project_id: impl Into<String>, location_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            location_id: location_id.into(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    /// Builds the catalog entry for `raw` inside entry group `group_id`.
    ///
    /// Returns the generated entry id together with the entry.
    pub fn make_entry(&self, group_id: &str, raw: &RawEntry) -> Result<(String, CatalogEntry)> {
        let group_id = mandatory(group_id, "group_id")?;
        let display_name = mandatory(&raw.display_name, "display_name")?;
        let linked_resource = mandatory(&raw.linked_resource, "linked_resource")?;
        let user_specified_type = mandatory(&raw.user_specified_type, "user_specified_type")?;
        let user_specified_system =
            mandatory(&raw.user_specified_system, "user_specified_system")?;

        let entry_id = make_entry_id(display_name);

        let create_time_seconds = raw
            .created_at
            .as_deref()
            .map(|value| parse_timestamp("created_at", value))
            .transpose()?;
        let update_time_seconds = raw
            .updated_at
            .as_deref()
            .map(|value| parse_timestamp("updated_at", value))
            .transpose()?;

        let entry = CatalogEntry {
            name: entry_path(&self.project_id, &self.location_id, group_id, &entry_id),
            linked_resource: linked_resource.to_string(),
            display_name: format_display_name(display_name),
            description: raw
                .description
                .as_ref()
                .filter(|description| !description.is_empty())
                .cloned(),
            user_specified_type: user_specified_type.to_string(),
            user_specified_system: user_specified_system.to_string(),
            create_time_seconds,
            update_time_seconds,
        };

        Ok((entry_id, entry))
    }
}
