//! Vocabulary client error types.

/// Errors from vocabulary service lookups.
///
/// Field checkers must treat any of these as inability to confirm a
/// value — a WARNING, never a FAIL.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// HTTP transport failure (connect, TLS, timeout).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Endpoint URL of the failed request.
        endpoint: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The service returned a server-side error status.
    #[error("vocabulary service {endpoint} returned {status}: {body}")]
    Service {
        /// Endpoint URL of the failed request.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        body: String,
    },

    /// The collection payload was not the expected JSON-LD shape.
    #[error("malformed collection payload from {endpoint}: {reason}")]
    Payload {
        /// Endpoint URL the payload came from.
        endpoint: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
