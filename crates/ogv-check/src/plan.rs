//! # Check Plan — Explicit Ordering with Declared Dependencies
//!
//! Checkers are independent and order-commutative except where one
//! section's correction feeds another section's check (the variables
//! checker reads the corrected sensors section). Those dependencies are
//! declared on the checker and validated once when the plan is built —
//! never left to incidental call order.

use ogv_core::{Document, DocumentReport};
use thiserror::Error;

use crate::contact::ContactCheck;
use crate::context::CheckContext;
use crate::deployment::DeploymentCheck;
use crate::platform::PlatformCheck;
use crate::sensor::SensorCheck;
use crate::variable::VariableCheck;

/// One named validation rule over a document section.
pub trait Check {
    /// Stable name, used in dependency declarations and log fields.
    fn name(&self) -> &'static str;

    /// Names of checks whose corrections this check reads. Each must
    /// appear earlier in the plan.
    fn depends_on(&self) -> &'static [&'static str] {
        &[]
    }

    /// Run the rule against the corrected document, appending outcomes.
    fn run(&self, ctx: &CheckContext<'_>, doc: &mut Document, report: &mut DocumentReport);
}

/// Error building a check plan.
#[derive(Error, Debug)]
pub enum PlanError {
    /// A declared dependency does not run before its dependent.
    #[error("check '{check}' depends on '{dependency}', which does not run before it")]
    UnsatisfiedDependency {
        /// The dependent check.
        check: String,
        /// The missing or late dependency.
        dependency: String,
    },

    /// Two checks share a name.
    #[error("duplicate check name '{0}' in plan")]
    DuplicateCheck(String),
}

/// An ordered, dependency-validated list of checks. Resolved once at
/// startup.
pub struct CheckPlan {
    checks: Vec<Box<dyn Check>>,
}

impl std::fmt::Debug for CheckPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckPlan")
            .field(
                "checks",
                &self.checks.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl CheckPlan {
    /// Build a plan from an ordered list, validating that every declared
    /// dependency appears earlier in the list.
    pub fn new(checks: Vec<Box<dyn Check>>) -> Result<Self, PlanError> {
        let mut seen: Vec<&str> = Vec::with_capacity(checks.len());
        for check in &checks {
            if seen.contains(&check.name()) {
                return Err(PlanError::DuplicateCheck(check.name().to_string()));
            }
            for dependency in check.depends_on() {
                if !seen.contains(dependency) {
                    return Err(PlanError::UnsatisfiedDependency {
                        check: check.name().to_string(),
                        dependency: dependency.to_string(),
                    });
                }
            }
            seen.push(check.name());
        }
        Ok(Self { checks })
    }

    /// The standard OG1 plan: platform, sensors, variables (reads the
    /// corrected sensors section), deployment, contacts.
    pub fn standard() -> Result<Self, PlanError> {
        Self::new(vec![
            Box::new(PlatformCheck),
            Box::new(SensorCheck),
            Box::new(VariableCheck),
            Box::new(DeploymentCheck),
            Box::new(ContactCheck),
        ])
    }

    /// The checks, in run order.
    pub fn checks(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|check| check.as_ref())
    }

    /// Number of checks in the plan.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// True for a plan with no checks.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
