//! # ogv-report — Report Writer
//!
//! Serializes validation results: every outcome goes to the run log,
//! grouped by document and field with its severity and message; a
//! document with zero FAIL outcomes is additionally written to the
//! validated-output directory as YAML. The writer keeps the run totals
//! (documents read and written, outcomes by severity) and appends them
//! as a closing summary.
//!
//! Records are mirrored to `tracing` at matching levels so an operator
//! watching the console sees what lands in the log artifact.

mod writer;

pub use writer::{ReportError, ReportWriter, RunSummary};
