//! # ogv-core — Foundational Types for the OG1 Vocabulary Validator
//!
//! This crate is the bedrock of the `ogv` workspace. It defines the types
//! shared by the vocabulary client, the field checkers, and the report
//! writer. Every other crate in the workspace depends on `ogv-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for vocabulary identifiers.** `CollectionId`,
//!    `ConceptUri`, `DocumentId` — all newtypes with validated constructors.
//!    No bare strings for identifiers.
//!
//! 2. **URI normalization at construction.** `ConceptUri::parse()` folds the
//!    two divergences metadata authors habitually introduce (an `https`
//!    scheme, a missing trailing slash) so that two spellings of the same
//!    concept compare equal everywhere downstream.
//!
//! 3. **Single `Severity` enum.** One definition of the four outcome
//!    severities, exhaustive `match` everywhere. Only `Fail` blocks writing
//!    a validated document.
//!
//! 4. **Immutable inputs.** `Document` supports cloning and in-place
//!    correction of the clone; the loaded original is never mutated by any
//!    validation pass.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ogv-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`.

pub mod document;
pub mod error;
pub mod identity;
pub mod outcome;

// Re-export primary types for ergonomic imports.
pub use document::Document;
pub use error::OgvError;
pub use identity::{CollectionId, ConceptUri, DocumentId};
pub use outcome::{DocumentReport, Outcome, Severity};
