//! # Collection Index
//!
//! In-memory index of one fetched vocabulary collection: concepts keyed
//! by URI for direct resolution, scanned by label for term lookups. Built
//! once per collection per run by the client and shared behind `Arc`.

use std::collections::HashMap;

use ogv_core::{CollectionId, ConceptUri};

use crate::client::MatchKind;
use crate::concept::Concept;
use crate::label::MatchPolicy;

/// Index of one collection's concepts.
#[derive(Debug, Clone)]
pub struct CollectionIndex {
    id: CollectionId,
    concepts: Vec<Concept>,
    by_uri: HashMap<ConceptUri, usize>,
}

impl CollectionIndex {
    /// Build an index from parsed concepts. Later duplicates of a URI are
    /// ignored.
    pub fn new(id: CollectionId, concepts: Vec<Concept>) -> Self {
        let mut by_uri = HashMap::with_capacity(concepts.len());
        for (position, concept) in concepts.iter().enumerate() {
            by_uri.entry(concept.uri.clone()).or_insert(position);
        }
        Self {
            id,
            concepts,
            by_uri,
        }
    }

    /// The collection this index covers.
    pub fn id(&self) -> &CollectionId {
        &self.id
    }

    /// Number of indexed concepts.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// True for a collection with no concepts (e.g. unknown on the server).
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// All concepts, in graph order.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter()
    }

    /// Resolve a concept by its normalized URI.
    pub fn by_uri(&self, uri: &ConceptUri) -> Option<&Concept> {
        self.by_uri.get(uri).map(|&i| &self.concepts[i])
    }

    /// Look a term up by label.
    ///
    /// A byte-identical preferred label is an exact match. Under the
    /// policy, a variant preferred label or any alternate label is a
    /// close match — the caller corrects toward the preferred label and
    /// records the change.
    pub fn by_label(&self, term: &str, policy: MatchPolicy) -> Option<(&Concept, MatchKind)> {
        if let Some(concept) = self.concepts.iter().find(|c| c.pref_label == term) {
            return Some((concept, MatchKind::Exact));
        }
        if let Some(concept) = self
            .concepts
            .iter()
            .find(|c| policy.matches(&c.pref_label, term))
        {
            return Some((concept, MatchKind::Close));
        }
        self.concepts
            .iter()
            .find(|c| c.alt_labels.iter().any(|alt| policy.matches(alt, term)))
            .map(|c| (c, MatchKind::Close))
    }
}
