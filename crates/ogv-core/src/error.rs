//! # Error Types — Shared Error Taxonomy
//!
//! Defines the errors raised by the foundational types. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Validation findings are NOT errors: a field that fails a vocabulary
//! check becomes an [`Outcome`](crate::outcome::Outcome) in the document's
//! report. The variants here cover malformed identifiers and documents
//! that cannot be represented at all.

use thiserror::Error;

/// Top-level error type for the foundational layer.
#[derive(Error, Debug)]
pub enum OgvError {
    /// An identifier failed validation at construction.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A concept URI was malformed beyond what normalization repairs.
    #[error("invalid concept URI '{uri}': {reason}")]
    InvalidUri {
        /// The URI text as given.
        uri: String,
        /// Reason the URI was rejected.
        reason: String,
    },

    /// The document root is not a mapping of named sections.
    #[error("document '{0}' root is not a mapping")]
    RootNotMapping(String),

    /// A YAML value has no JSON representation (needed for the
    /// structural gate).
    #[error("document is not JSON-representable: {0}")]
    NotJsonRepresentable(String),

    /// YAML (de)serialization error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
