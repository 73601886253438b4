//! # Vocabulary Identity Newtypes
//!
//! Newtype wrappers for the identifiers used against the vocabulary
//! service. These prevent accidental identifier confusion — you cannot
//! pass a collection id where a concept URI is expected.
//!
//! `ConceptUri` carries the normalization the reference server tolerates
//! but draft metadata routinely gets wrong: an `https` scheme and a
//! missing trailing slash. Both are folded at construction so that two
//! spellings of the same concept compare equal.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OgvError;

/// Identifier of a collection on the vocabulary server (e.g. `L22` for
/// sensor models, `P07` for CF standard names).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    /// Validate and construct a collection identifier.
    ///
    /// Accepts short uppercase alphanumeric codes (`L22`, `OG1`, `B76`,
    /// `W08`). Anything else is rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, OgvError> {
        let id = id.into();
        let valid = !id.is_empty()
            && id.len() <= 8
            && id.chars().all(|c| c.is_ascii_alphanumeric())
            && id.chars().any(|c| c.is_ascii_uppercase());
        if !valid {
            return Err(OgvError::InvalidIdentifier(format!(
                "'{id}' is not a collection id (expected a short uppercase code like L22)"
            )));
        }
        Ok(Self(id))
    }

    /// Access the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CollectionId {
    type Err = OgvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Stable URI of a vocabulary concept, e.g.
/// `http://vocab.nerc.ac.uk/collection/L22/current/TOOL1457/`.
///
/// Construction normalizes an `https` scheme to `http` and appends the
/// trailing slash when missing, matching how the server canonicalizes
/// its own identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptUri(String);

impl ConceptUri {
    /// Parse and normalize a concept URI.
    pub fn parse(raw: &str) -> Result<Self, OgvError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OgvError::InvalidUri {
                uri: raw.to_string(),
                reason: "empty".to_string(),
            });
        }
        let mut uri = if let Some(rest) = trimmed.strip_prefix("https://") {
            format!("http://{rest}")
        } else if trimmed.starts_with("http://") {
            trimmed.to_string()
        } else {
            return Err(OgvError::InvalidUri {
                uri: raw.to_string(),
                reason: "expected an http(s) URI".to_string(),
            });
        };
        if uri.contains(char::is_whitespace) {
            return Err(OgvError::InvalidUri {
                uri: raw.to_string(),
                reason: "contains whitespace".to_string(),
            });
        }
        if !uri.ends_with('/') {
            uri.push('/');
        }
        Ok(Self(uri))
    }

    /// Access the normalized URI text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The collection segment of the URI path, when it follows the
    /// server's `/collection/<id>/current/<concept>/` layout.
    pub fn collection(&self) -> Option<CollectionId> {
        let path = self.0.strip_prefix("http://")?;
        let mut segments = path.split('/');
        while let Some(segment) = segments.next() {
            if segment == "collection" {
                return segments.next().and_then(|id| CollectionId::new(id).ok());
            }
        }
        None
    }
}

impl fmt::Display for ConceptUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConceptUri {
    type Err = OgvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Identifier of one deployment document, derived from its file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Validate and construct a document identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, OgvError> {
        let id = id.into();
        if id.is_empty() || id.contains(['/', '\\']) {
            return Err(OgvError::InvalidIdentifier(format!(
                "'{id}' is not a document id (must be non-empty, no path separators)"
            )));
        }
        Ok(Self(id))
    }

    /// Derive the identifier from a document path's file stem.
    pub fn from_path(path: &Path) -> Result<Self, OgvError> {
        let stem = path
            .file_stem()
            .or_else(|| path.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(stem)
    }

    /// Access the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
