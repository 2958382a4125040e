//! # Error Handling
//!
//! This module defines the centralized error type for the custom entries
//! synchronizer. It uses the `thiserror` library to build a single `Error`
//! enum covering every failure a synchronization run can hit, with messages
//! that name the offending column, key, field, or catalog operation.
//!
//! ## Taxonomy
//!
//! - **Schema errors** (`MissingColumn`, `MissingKey`, `ConflictingKeys`): the
//!   input file does not
//!   have the shape the readers expect.
//! - **Validation errors** (`MissingValue`, `MissingField`, `InvalidTimestamp`,
//!   `InvalidFilter`): the shape is right but a value is blank or malformed.
//! - **`NoInputProvided`**: neither a CSV nor a JSON file was given.
//! - **Catalog errors** (`Catalog`, `LockPoisoned`): the catalog collaborator
//!   failed.
//! - **Wrapped errors** (`Io`, `Csv`, `Json`): converted with `#[from]`.
//!
//! Every error is fatal for the run; there is no partial-success reporting.

use thiserror::Error;

/// Main error type for custom entries operations
#[derive(Error, Debug)]
pub enum Error {
    /// A mandatory column is absent from the CSV header row.
    #[error("Missing mandatory column: {column}")]
    MissingColumn { column: String },

    /// A mandatory key is absent from the JSON document.
    #[error("Missing mandatory key '{key}' at {location}")]
    MissingKey { key: String, location: String },

    /// A JSON object carries two spellings of the same key.
    #[error("Conflicting keys {keys} at {location}: only one of them may be given")]
    ConflictingKeys { keys: String, location: String },

    /// A mandatory value is present in the input but blank.
    #[error("Blank value for mandatory field '{field}' at {location}")]
    MissingValue { field: String, location: String },

    /// A raw entry handed to the entry factory lacks a mandatory field.
    #[error("Missing mandatory field: {field}")]
    MissingField { field: String },

    /// A timestamp does not match the `%Y-%m-%dT%H:%M:%S%z` format.
    #[error("Invalid timestamp for '{field}': {value} ({message})")]
    InvalidTimestamp {
        field: String,
        value: String,
        message: String,
    },

    /// A catalog filter expression could not be parsed.
    #[error("Invalid filter expression: {expression}")]
    InvalidFilter { expression: String },

    /// Neither a CSV nor a JSON input file was provided.
    #[error("No input provided: either a CSV or a JSON file must be given")]
    NoInputProvided,

    /// A catalog operation failed.
    #[error("Catalog operation error: {operation} - {message}")]
    Catalog { operation: String, message: String },

    /// A mutex guarding catalog state has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A CSV parsing error, wrapped from `csv::Error`.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON parsing or serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for errors caused by the shape of the input file.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Error::MissingColumn { .. } | Error::MissingKey { .. } | Error::ConflictingKeys { .. }
        )
    }

    /// Returns true for errors caused by a blank or malformed input value.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::MissingValue { .. }
                | Error::MissingField { .. }
                | Error::InvalidTimestamp { .. }
                | Error::InvalidFilter { .. }
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
