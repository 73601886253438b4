//! # Deployment Document Model
//!
//! A `Document` wraps the YAML mapping of one glider deployment's
//! metadata. Sections are the top-level keys (`platform`, `sensors`,
//! `variables`, `deployment`, `contacts`); checkers read and correct
//! nested values through the accessors here.
//!
//! The loaded original is never mutated by a validation pass: the
//! validator clones the document and applies corrections to the clone.
//!
//! YAML has a richer type system than JSON (tags, anchors), but OG1
//! documents use only the JSON-compatible subset; `to_json()` converts
//! the value tree for the JSON Schema structural gate and rejects
//! anything outside that subset.

use serde_yaml::{Mapping, Value};

use crate::error::OgvError;
use crate::identity::DocumentId;

/// One glider deployment's metadata document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: DocumentId,
    root: Mapping,
}

impl Document {
    /// Parse a document from YAML text. The root must be a mapping.
    pub fn parse(id: DocumentId, yaml: &str) -> Result<Self, OgvError> {
        let value: Value = serde_yaml::from_str(yaml)?;
        match value {
            Value::Mapping(root) => Ok(Self { id, root }),
            _ => Err(OgvError::RootNotMapping(id.to_string())),
        }
    }

    /// Construct a document from an already-built mapping.
    pub fn from_mapping(id: DocumentId, root: Mapping) -> Self {
        Self { id, root }
    }

    /// The document identifier (input file stem).
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// The root mapping.
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// A top-level section by name.
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }

    /// Mutable access to a top-level section, for applying corrections.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.root.get_mut(name)
    }

    /// Serialize the document back to YAML.
    pub fn to_yaml_string(&self) -> Result<String, OgvError> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Convert the document to a JSON value for schema validation.
    pub fn to_json(&self) -> Result<serde_json::Value, OgvError> {
        yaml_to_json(&Value::Mapping(self.root.clone()))
    }
}

/// Convert a `serde_yaml::Value` tree into the equivalent
/// `serde_json::Value` tree.
pub fn yaml_to_json(yaml: &Value) -> Result<serde_json::Value, OgvError> {
    match yaml {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(serde_json::Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(serde_json::Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| {
                        OgvError::NotJsonRepresentable(format!("float {f} has no JSON form"))
                    })
            } else {
                Err(OgvError::NotJsonRepresentable(format!(
                    "unsupported YAML number: {n:?}"
                )))
            }
        }
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Sequence(seq) => {
            let items: Result<Vec<serde_json::Value>, OgvError> =
                seq.iter().map(yaml_to_json).collect();
            Ok(serde_json::Value::Array(items?))
        }
        Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(OgvError::NotJsonRepresentable(format!(
                            "unsupported YAML map key: {other:?}"
                        )))
                    }
                };
                json_map.insert(key, yaml_to_json(v)?);
            }
            Ok(serde_json::Value::Object(json_map))
        }
        // Ignore YAML tags, just convert the inner value.
        Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}
