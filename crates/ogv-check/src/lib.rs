//! # ogv-check — Field Checkers and Document Validator
//!
//! The rule set of the OG1 vocabulary validator. One checker per
//! metadata section (platform, sensors, variables, deployment,
//! contacts), each a pure rule over the corrected document and the
//! vocabulary capability, composed by an explicitly ordered
//! [`CheckPlan`] and fronted by the JSON Schema structural gate.
//!
//! ## Outcome Policy
//!
//! - Value absent from the vocabulary, no close match — FAIL.
//! - Close match (per the configured policy) — auto-correct plus
//!   RECOMMENDATION noting the change.
//! - Optional field or section missing — WARNING.
//! - Lookup error — WARNING ("could not verify"), never FAIL.
//!
//! ## Ordering
//!
//! Checkers declare the checks whose corrections they read
//! (`variables` reads the corrected `sensors` section); the plan
//! validates those declarations once at startup instead of trusting
//! incidental call order.

pub mod contact;
pub mod context;
pub mod deployment;
mod fields;
pub mod plan;
pub mod platform;
pub mod sensor;
pub mod structure;
pub mod validator;
pub mod variable;

// Re-export primary types for ergonomic imports.
pub use contact::ContactCheck;
pub use context::{CheckContext, Collections};
pub use deployment::DeploymentCheck;
pub use plan::{Check, CheckPlan, PlanError};
pub use platform::PlatformCheck;
pub use sensor::SensorCheck;
pub use structure::{StructuralGate, StructureError, Violation};
pub use validator::{Validator, ValidatorError};
pub use variable::VariableCheck;
