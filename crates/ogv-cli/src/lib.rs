//! # ogv-cli — OG1 Vocabulary Validator Command-Line Interface
//!
//! Thin glue around the library crates: file discovery over the input
//! directory, configuration flags, and dispatch. All validation logic
//! lives in `ogv-check`; all result writing in `ogv-report`.
//!
//! ## Subcommands
//!
//! - `validate` — Validate a directory of deployment documents.
//! - `lookup` — One-off term query against a vocabulary collection.
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the domain crates — no rules here.
//! - A failure in one document must not abort the run; only an
//!   unreadable input directory or an unwritable log/output is fatal.

pub mod lookup;
pub mod validate;
