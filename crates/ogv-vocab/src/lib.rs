//! # ogv-vocab — Vocabulary Client
//!
//! Lookups against the controlled-vocabulary reference service (the NERC
//! Vocabulary Server). The service is abstracted behind the
//! [`VocabLookup`] capability trait so field checkers never couple to a
//! transport: production uses [`NvsClient`], tests use [`MemoryVocab`].
//!
//! ## Architecture
//!
//! The server publishes each collection as one JSON-LD graph. `NvsClient`
//! fetches a collection the first time any term in it is needed, parses
//! the graph into a [`CollectionIndex`] (by URI and by label), and caches
//! the index for the rest of the run — one HTTP round-trip per collection
//! per run, every subsequent query answered locally.
//!
//! ## Error Handling
//!
//! Transport failures and 5xx statuses surface as [`LookupError`] with
//! the endpoint in context; callers treat them as "could not verify", not
//! as a missing term. An unknown collection (4xx) behaves as an empty
//! one, so term lookups degrade to not-found.

pub mod client;
pub mod concept;
pub mod error;
pub mod http;
pub mod index;
pub mod label;

// Re-export primary types for ergonomic imports.
pub use client::{MatchKind, MemoryVocab, TermMatch, VocabLookup};
pub use concept::Concept;
pub use error::LookupError;
pub use http::{NvsClient, NvsConfig};
pub use index::CollectionIndex;
pub use label::MatchPolicy;
