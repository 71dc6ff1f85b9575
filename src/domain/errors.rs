//! Error taxonomy for the retrieval core.

use thiserror::Error;

/// Maximum length of a remote response body carried inside an error message.
const BODY_EXCERPT_LEN: usize = 512;

/// Errors surfaced by the retrieval core.
///
/// None of these are recovered internally: every variant is fatal to the
/// operation that produced it and propagates to the caller with enough
/// detail (status code, response body excerpt) to diagnose. Retry policy
/// belongs to the caller.
#[derive(Debug, Error)]
pub enum RagError {
    /// The embedding call failed or its response did not contain one
    /// vector per requested text.
    #[error("embedding provider error: {0}")]
    Provider(String),

    /// Missing or inconsistent configuration, e.g. a dimensionality
    /// mismatch between the provider and the configured vector size.
    #[error("configuration error: {0}")]
    Config(String),

    /// The vector store returned a malformed or non-success response.
    #[error("vector backend error: {0}")]
    Backend(String),

    /// The entity bundle fetch from the upstream content source failed.
    #[error("entity bundle fetch failed: {0}")]
    UpstreamFetch(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type RagResult<T> = Result<T, RagError>;

impl From<serde_json::Error> for RagError {
    fn from(err: serde_json::Error) -> Self {
        RagError::Serialization(err.to_string())
    }
}

/// Bound a response body for inclusion in an error message.
pub fn body_excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
