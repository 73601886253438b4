//! # Structural Gate
//!
//! Validates a document's shape against the embedded OG1 deployment
//! JSON Schema (Draft 2020-12) before any field-level checker runs. A
//! structurally unsound document gets a single FAIL outcome and no
//! field-level checks — the checkers assume the sections they read are
//! present and correctly shaped.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The OG1 deployment document schema, embedded at compile time.
const OG1_SCHEMA: &str = include_str!("../schemas/og1-deployment.schema.json");

/// Error building the structural gate (invalid embedded schema).
#[derive(Error, Debug)]
pub enum StructureError {
    /// The embedded schema could not be parsed or compiled.
    #[error("cannot compile embedded document schema: {0}")]
    Schema(String),
}

/// A single structural violation with its location in the document.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the document.
    pub instance_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Compiled validator for the deployment document shape.
#[derive(Debug)]
pub struct StructuralGate {
    validator: jsonschema::Validator,
}

impl StructuralGate {
    /// Compile the embedded schema. Built once at startup.
    pub fn new() -> Result<Self, StructureError> {
        let schema: Value =
            serde_json::from_str(OG1_SCHEMA).map_err(|e| StructureError::Schema(e.to_string()))?;
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(&schema)
            .map_err(|e| StructureError::Schema(e.to_string()))?;
        Ok(Self { validator })
    }

    /// The structural violations for a document; empty when sound.
    pub fn violations(&self, instance: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }
}
