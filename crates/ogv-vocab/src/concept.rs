//! # SKOS Concepts and JSON-LD Graph Parsing
//!
//! The vocabulary server publishes each collection as a JSON-LD document
//! whose `@graph` mixes concept nodes with a trailing collection
//! descriptor. SKOS link fields (`skos:broader`, `skos:related`,
//! `skos:inScheme`, `skos:altLabel`) appear as a single object when there
//! is one value and as an array otherwise, and literal fields
//! (`skos:prefLabel`, `skos:definition`) may be a bare string or a
//! `{"@value": …}` object. The parser here tolerates all of those shapes;
//! nodes that are not concepts are skipped with a debug log.

use ogv_core::ConceptUri;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A concept from the vocabulary service: stable URI, labels, and the
/// SKOS links the checkers follow (broader → sensor type, related →
/// maker or units).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Stable identifier of the concept.
    pub uri: ConceptUri,
    /// Preferred label — the canonical spelling checkers correct toward.
    pub pref_label: String,
    /// Alternate labels accepted as close matches.
    pub alt_labels: Vec<String>,
    /// Definition text, when published.
    pub definition: Option<String>,
    /// `skos:broader` links (e.g. an L22 model's L05 sensor type).
    pub broader: Vec<ConceptUri>,
    /// `skos:related` links (e.g. an L22 model's L35 maker, a parameter's
    /// P06 units).
    pub related: Vec<ConceptUri>,
    /// `skos:inScheme` memberships, as raw URIs.
    pub schemes: Vec<String>,
}

impl Concept {
    /// Parse one `@graph` node. Returns `None` for nodes that are not
    /// concepts (the collection descriptor, malformed entries).
    pub fn from_graph_node(node: &Value) -> Option<Self> {
        let Value::Object(_) = node else {
            tracing::debug!("skipping non-mapping graph node");
            return None;
        };
        let id = node.get("@id").and_then(Value::as_str)?;
        let uri = match ConceptUri::parse(id) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::debug!("skipping graph node with unusable @id: {e}");
                return None;
            }
        };
        let pref_label = node.get("skos:prefLabel").and_then(literal)?;

        let alt_labels = node
            .get("skos:altLabel")
            .map(|v| one_or_many(v).iter().filter_map(|x| literal(x)).collect())
            .unwrap_or_default();
        let definition = node.get("skos:definition").and_then(literal);
        let broader = link_uris(node.get("skos:broader"));
        let related = link_uris(node.get("skos:related"));
        let schemes = node
            .get("skos:inScheme")
            .map(|v| {
                one_or_many(v)
                    .iter()
                    .filter_map(|x| x.get("@id").and_then(Value::as_str))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            uri,
            pref_label,
            alt_labels,
            definition,
            broader,
            related,
            schemes,
        })
    }

    /// Broader links into the given collection.
    pub fn broader_in(&self, collection: &ogv_core::CollectionId) -> Vec<&ConceptUri> {
        self.broader
            .iter()
            .filter(|u| u.collection().as_ref() == Some(collection))
            .collect()
    }

    /// First related link into the given collection.
    pub fn related_in(&self, collection: &ogv_core::CollectionId) -> Option<&ConceptUri> {
        self.related
            .iter()
            .find(|u| u.collection().as_ref() == Some(collection))
    }
}

/// Literal field: bare string or `{"@value": …}` object.
fn literal(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("@value").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

/// SKOS link fields are an object for one value, an array otherwise.
fn one_or_many(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn link_uris(value: Option<&Value>) -> Vec<ConceptUri> {
    let Some(value) = value else {
        return Vec::new();
    };
    one_or_many(value)
        .iter()
        .filter_map(|v| v.get("@id").and_then(Value::as_str))
        .filter_map(|id| ConceptUri::parse(id).ok())
        .collect()
}
