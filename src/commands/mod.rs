//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `datacatalog-custom-entries` command-line tool, one file per command.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `datacatalog_custom_entries` library.

pub mod completions;
pub mod sync;
pub mod validate;
