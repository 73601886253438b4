//! # Document Validator
//!
//! Orchestrates one document through the structural gate and the check
//! plan. The input document is never mutated: corrections land in a
//! cloned copy returned alongside the report.
//!
//! A structurally unsound document gets a single FAIL outcome and no
//! field-level checks — every checker may then assume the sections it
//! reads are present and correctly shaped.

use ogv_core::{Document, DocumentReport};
use thiserror::Error;

use crate::context::CheckContext;
use crate::plan::{CheckPlan, PlanError};
use crate::structure::{StructuralGate, StructureError};

/// Error constructing a validator.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// The embedded document schema failed to compile.
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// The check plan's declared ordering is inconsistent.
    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Validator for deployment documents: structural gate plus ordered
/// checkers. Built once, used for every document in the run.
pub struct Validator {
    gate: StructuralGate,
    plan: CheckPlan,
}

impl Validator {
    /// Build a validator with a custom plan.
    pub fn new(plan: CheckPlan) -> Result<Self, ValidatorError> {
        Ok(Self {
            gate: StructuralGate::new()?,
            plan,
        })
    }

    /// Build the standard OG1 validator.
    pub fn standard() -> Result<Self, ValidatorError> {
        Ok(Self {
            gate: StructuralGate::new()?,
            plan: CheckPlan::standard()?,
        })
    }

    /// Validate one document, returning the corrected copy and the
    /// ordered outcomes.
    pub fn validate(&self, ctx: &CheckContext<'_>, doc: &Document) -> (Document, DocumentReport) {
        let mut corrected = doc.clone();
        let mut report = DocumentReport::new(doc.id().clone());

        let instance = match corrected.to_json() {
            Ok(instance) => instance,
            Err(e) => {
                report.fail("(structure)", format!("document cannot be checked: {e}"));
                return (corrected, report);
            }
        };
        let violations = self.gate.violations(&instance);
        if !violations.is_empty() {
            let detail: Vec<String> = violations.iter().map(ToString::to_string).collect();
            report.fail(
                "(structure)",
                format!("structural check failed: {}", detail.join("; ")),
            );
            // Field-level checks assume a sound structure; stop here.
            return (corrected, report);
        }

        for check in self.plan.checks() {
            tracing::debug!(check = check.name(), document = %doc.id(), "running check");
            check.run(ctx, &mut corrected, &mut report);
        }
        (corrected, report)
    }
}
