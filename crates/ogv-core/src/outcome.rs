//! # Outcomes — Severity, Outcome, DocumentReport
//!
//! Defines the `Severity` enum with the four outcome grades. This is the
//! ONE definition used across the stack; every `match` on `Severity` must
//! be exhaustive, so adding a grade forces every consumer to handle it.
//!
//! Severities are ordered by blocking strength. Only `Fail` blocks
//! writing the corrected document; `Warning` and `Recommendation` are
//! recorded in the log but do not gate output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OgvError;
use crate::identity::DocumentId;

/// Severity of one validation outcome, ordered by blocking strength.
///
/// | Grade | Meaning | Blocks output |
/// |---|---|---|
/// | `Pass` | field/section confirmed against the vocabulary | no |
/// | `Warning` | unverifiable, or an optional field is missing | no |
/// | `Recommendation` | value auto-corrected from the vocabulary | no |
/// | `Fail` | value absent from the vocabulary, or a mandatory field missing | yes |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Confirmed against the vocabulary; nothing to change.
    Pass,
    /// Could not be verified, or an optional field is absent.
    Warning,
    /// Auto-corrected; the change is recorded for review.
    Recommendation,
    /// Not acceptable; the document will not be written.
    Fail,
}

impl Severity {
    /// Whether this severity blocks writing the validated document.
    pub fn blocks_output(&self) -> bool {
        matches!(self, Severity::Fail)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Pass => "PASS",
            Severity::Warning => "WARNING",
            Severity::Recommendation => "RECOMMENDATION",
            Severity::Fail => "FAIL",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Severity {
    type Err = OgvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PASS" => Ok(Severity::Pass),
            "WARNING" => Ok(Severity::Warning),
            "RECOMMENDATION" => Ok(Severity::Recommendation),
            "FAIL" => Ok(Severity::Fail),
            other => Err(OgvError::InvalidIdentifier(format!(
                "'{other}' is not an outcome severity"
            ))),
        }
    }
}

/// One validation outcome: a severity and message attached to a field of
/// one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Slash-separated field path within the document, e.g.
    /// `sensors/sensor_ctd/sensor_maker`, or `(structure)` for the
    /// document-level structural gate.
    pub field: String,
    /// Outcome grade.
    pub severity: Severity,
    /// Human-readable explanation.
    pub message: String,
}

impl Outcome {
    /// Construct an outcome.
    pub fn new(field: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            severity,
            message: message.into(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<14} {}: {}", self.severity, self.field, self.message)
    }
}

/// The ordered outcomes of validating one document.
///
/// Outcome order reflects check execution order. The report is passed
/// explicitly through the pipeline — there is no shared accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    document_id: DocumentId,
    outcomes: Vec<Outcome>,
}

impl DocumentReport {
    /// Start an empty report for one document.
    pub fn new(document_id: DocumentId) -> Self {
        Self {
            document_id,
            outcomes: Vec::new(),
        }
    }

    /// The document this report describes.
    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    /// Append an outcome.
    pub fn push(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    /// Append a `Pass` outcome.
    pub fn pass(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(Outcome::new(field, Severity::Pass, message));
    }

    /// Append a `Warning` outcome.
    pub fn warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(Outcome::new(field, Severity::Warning, message));
    }

    /// Append a `Recommendation` outcome.
    pub fn recommendation(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(Outcome::new(field, Severity::Recommendation, message));
    }

    /// Append a `Fail` outcome.
    pub fn fail(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(Outcome::new(field, Severity::Fail, message));
    }

    /// All outcomes, in execution order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Number of outcomes recorded so far.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when no outcome has been recorded.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of outcomes at the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.outcomes.iter().filter(|o| o.severity == severity).count()
    }

    /// Whether the document is eligible for the validated output:
    /// true when no outcome blocks it.
    pub fn passed(&self) -> bool {
        !self.outcomes.iter().any(|o| o.severity.blocks_output())
    }
}
