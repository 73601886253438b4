//! # Vocabulary Capability Interface
//!
//! The `VocabLookup` trait abstracts over the vocabulary backend.
//! Production uses [`crate::http::NvsClient`] against the live server;
//! tests use [`MemoryVocab`] with a fixed vocabulary and no network
//! access. Field checkers compose lookups without coupling to a
//! transport.

use std::collections::HashMap;

use ogv_core::{CollectionId, ConceptUri};

use crate::concept::Concept;
use crate::error::LookupError;
use crate::index::CollectionIndex;
use crate::label::MatchPolicy;

/// How a label query matched a concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Byte-identical to the preferred label; nothing to correct.
    Exact,
    /// Accepted under the match policy (case/spacing variant, or an
    /// alternate label); the caller corrects toward the preferred label.
    Close,
}

/// Result of a label lookup: the concept and how the query matched it.
#[derive(Debug, Clone)]
pub struct TermMatch {
    /// The matched concept.
    pub concept: Concept,
    /// Exact or close.
    pub kind: MatchKind,
}

impl TermMatch {
    /// True when the document value needs correcting toward the
    /// preferred label.
    pub fn needs_correction(&self) -> bool {
        self.kind == MatchKind::Close
    }
}

/// Capability interface over the vocabulary service.
pub trait VocabLookup {
    /// Look up a term by label within a collection.
    ///
    /// `Ok(None)` means the term is absent from the collection (or the
    /// collection is unknown to the server); `Err` means the lookup
    /// could not be performed at all.
    fn lookup(&self, term: &str, collection: &CollectionId) -> Result<Option<TermMatch>, LookupError>;

    /// Resolve a concept URI directly.
    ///
    /// The owning collection is derived from the URI path; URIs outside
    /// the server's `/collection/<id>/current/…` layout resolve to
    /// `Ok(None)`.
    fn concept(&self, uri: &ConceptUri) -> Result<Option<Concept>, LookupError>;
}

/// Fixed in-memory vocabulary for tests: same capability surface, no
/// network.
#[derive(Debug, Default)]
pub struct MemoryVocab {
    collections: HashMap<CollectionId, CollectionIndex>,
    policy: MatchPolicy,
}

impl MemoryVocab {
    /// An empty vocabulary with the given match policy.
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            collections: HashMap::new(),
            policy,
        }
    }

    /// Add a collection built from the given concepts.
    pub fn with_collection(mut self, id: CollectionId, concepts: Vec<Concept>) -> Self {
        self.collections
            .insert(id.clone(), CollectionIndex::new(id, concepts));
        self
    }
}

impl VocabLookup for MemoryVocab {
    fn lookup(&self, term: &str, collection: &CollectionId) -> Result<Option<TermMatch>, LookupError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|ix| ix.by_label(term, self.policy))
            .map(|(concept, kind)| TermMatch {
                concept: concept.clone(),
                kind,
            }))
    }

    fn concept(&self, uri: &ConceptUri) -> Result<Option<Concept>, LookupError> {
        let Some(collection) = uri.collection() else {
            return Ok(None);
        };
        Ok(self
            .collections
            .get(&collection)
            .and_then(|ix| ix.by_uri(uri))
            .cloned())
    }
}
