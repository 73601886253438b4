//! # Check Context — Collection Bindings
//!
//! Which vocabulary collection answers each field category. The bindings
//! are configuration, not constants buried in checkers, so the rule set
//! stays auditable and a deployment against a mirror server with
//! different collection codes needs no code change.

use ogv_core::{CollectionId, OgvError};
use ogv_vocab::VocabLookup;

/// Collection bindings for the OG1 rule set.
#[derive(Debug, Clone)]
pub struct Collections {
    /// Platform models (glider airframes).
    pub platform_models: CollectionId,
    /// Sensor models.
    pub sensor_models: CollectionId,
    /// Sensor makers.
    pub sensor_makers: CollectionId,
    /// Sensor types, linked from models via `broader`.
    pub sensor_types: CollectionId,
    /// Variable parameter collections, searched in order.
    pub parameters: Vec<CollectionId>,
    /// CF standard names.
    pub standard_names: CollectionId,
    /// Units of measure, linked from parameters via `related`.
    pub units: CollectionId,
    /// Contributor roles.
    pub contributor_roles: CollectionId,
}

impl Collections {
    /// The standard OG1 bindings on the NERC Vocabulary Server.
    pub fn og1() -> Result<Self, OgvError> {
        Ok(Self {
            platform_models: CollectionId::new("B76")?,
            sensor_models: CollectionId::new("L22")?,
            sensor_makers: CollectionId::new("L35")?,
            sensor_types: CollectionId::new("L05")?,
            parameters: vec![
                CollectionId::new("OG1")?,
                CollectionId::new("P01")?,
                CollectionId::new("P02")?,
            ],
            standard_names: CollectionId::new("P07")?,
            units: CollectionId::new("P06")?,
            contributor_roles: CollectionId::new("W08")?,
        })
    }
}

/// Shared read-only context passed to every checker: the vocabulary
/// capability and the collection bindings. The match policy lives inside
/// the vocabulary client.
pub struct CheckContext<'a> {
    /// Vocabulary lookup capability.
    pub vocab: &'a dyn VocabLookup,
    /// Collection bindings.
    pub collections: &'a Collections,
}
