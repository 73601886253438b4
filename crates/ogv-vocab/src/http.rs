//! # NVS HTTP Client
//!
//! Blocking HTTP client for the NERC Vocabulary Server. The pipeline is
//! synchronous and single-threaded, so requests block with a fixed
//! per-request timeout; there is no retry layer — a transport failure
//! surfaces as [`LookupError`] and the caller downgrades the finding to
//! "could not verify".
//!
//! ## Caching
//!
//! The server publishes whole collections; fetching per term would
//! multiply round-trips for nothing. The client fetches a collection the
//! first time it is queried and serves every later lookup from the
//! in-memory [`CollectionIndex`]. Cache lifetime is the process run.
//!
//! ## Status Mapping
//!
//! - 2xx — parsed as a JSON-LD collection graph.
//! - 4xx — unknown collection; behaves as an empty one (lookups
//!   return not-found).
//! - 5xx — `LookupError::Service`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use ogv_core::{CollectionId, ConceptUri};
use serde_json::Value;
use url::Url;

use crate::client::{TermMatch, VocabLookup};
use crate::concept::Concept;
use crate::error::LookupError;
use crate::index::CollectionIndex;
use crate::label::MatchPolicy;

/// Default vocabulary server.
pub const DEFAULT_BASE_URL: &str = "http://vocab.nerc.ac.uk";

/// Configuration for the NVS HTTP client.
#[derive(Debug, Clone)]
pub struct NvsConfig {
    /// Base URL of the vocabulary server.
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
    /// Close-match policy for label lookups.
    pub policy: MatchPolicy,
}

impl NvsConfig {
    /// Configuration against the given server with default timeout and
    /// match policy.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
            policy: MatchPolicy::default(),
        }
    }
}

impl Default for NvsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// HTTP client for the vocabulary server with a per-run collection cache.
#[derive(Debug)]
pub struct NvsClient {
    client: reqwest::blocking::Client,
    base_url: String,
    policy: MatchPolicy,
    cache: Mutex<HashMap<CollectionId, Arc<CollectionIndex>>>,
}

impl NvsClient {
    /// Build a client from configuration.
    pub fn new(config: NvsConfig) -> Result<Self, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(LookupError::Client)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            policy: config.policy,
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn collection_endpoint(&self, id: &CollectionId) -> Result<String, LookupError> {
        let raw = format!("{}/collection/{}/current/", self.base_url, id);
        let mut url = Url::parse(&raw).map_err(|e| LookupError::Payload {
            endpoint: raw.clone(),
            reason: format!("invalid endpoint URL: {e}"),
        })?;
        url.query_pairs_mut()
            .append_pair("_profile", "nvs")
            .append_pair("_mediatype", "application/ld+json");
        Ok(url.into())
    }

    /// The cached index for a collection, fetching it on first use.
    fn collection(&self, id: &CollectionId) -> Result<Arc<CollectionIndex>, LookupError> {
        {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(index) = cache.get(id) {
                return Ok(Arc::clone(index));
            }
        }
        let index = Arc::new(self.fetch_collection(id)?);
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(id.clone()).or_insert(index)))
    }

    fn fetch_collection(&self, id: &CollectionId) -> Result<CollectionIndex, LookupError> {
        let endpoint = self.collection_endpoint(id)?;
        tracing::debug!(collection = %id, "fetching vocabulary collection");

        let response = self
            .client
            .get(&endpoint)
            .send()
            .map_err(|source| LookupError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if status.is_client_error() {
            // Unknown collection: lookups against it degrade to not-found.
            tracing::warn!(collection = %id, status = status.as_u16(), "collection not available, treating as empty");
            return Ok(CollectionIndex::new(id.clone(), Vec::new()));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LookupError::Service {
                endpoint,
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let payload: Value = response.json().map_err(|e| LookupError::Payload {
            endpoint: endpoint.clone(),
            reason: format!("response is not JSON: {e}"),
        })?;
        let graph = payload
            .get("@graph")
            .and_then(Value::as_array)
            .ok_or_else(|| LookupError::Payload {
                endpoint: endpoint.clone(),
                reason: "missing @graph array".to_string(),
            })?;

        let concepts: Vec<Concept> = graph.iter().filter_map(Concept::from_graph_node).collect();
        tracing::info!(collection = %id, concepts = concepts.len(), "indexed vocabulary collection");
        Ok(CollectionIndex::new(id.clone(), concepts))
    }
}

impl VocabLookup for NvsClient {
    fn lookup(&self, term: &str, collection: &CollectionId) -> Result<Option<TermMatch>, LookupError> {
        let index = self.collection(collection)?;
        Ok(index.by_label(term, self.policy).map(|(concept, kind)| TermMatch {
            concept: concept.clone(),
            kind,
        }))
    }

    fn concept(&self, uri: &ConceptUri) -> Result<Option<Concept>, LookupError> {
        let Some(collection) = uri.collection() else {
            return Ok(None);
        };
        let index = self.collection(&collection)?;
        Ok(index.by_uri(uri).cloned())
    }
}

/// First 200 characters of an error body, for diagnostics.
fn excerpt(body: &str) -> String {
    let mut out: String = body.chars().take(200).collect();
    if out.len() < body.len() {
        out.push('…');
    }
    out
}
