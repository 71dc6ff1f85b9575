//! Vector backend port: persistence and similarity search over documents.
//!
//! Implementations own storage and scoring but share one contract, so the
//! concrete backend is chosen once at startup and injected everywhere
//! behind this trait. The ranking/filtering behavior must be identical
//! across backends.

use async_trait::async_trait;

use crate::domain::errors::RagResult;
use crate::domain::models::{VectorDoc, VectorHit};

/// Default number of ranked results returned by a search.
pub const DEFAULT_TOP_K: usize = 5;

/// Options for a backend search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Restrict results to documents tagged with this entity id.
    /// Documents without an entity id never match a scoped search.
    pub entity_id: Option<String>,
    /// Maximum number of results.
    pub top_k: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            entity_id: None,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl SearchOptions {
    /// Unscoped search returning at most `top_k` hits.
    pub fn top_k(top_k: usize) -> Self {
        Self {
            entity_id: None,
            top_k,
        }
    }

    /// Search scoped to one entity.
    pub fn scoped(entity_id: impl Into<String>, top_k: usize) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
            top_k,
        }
    }
}

/// Trait for vector storage and similarity search.
#[async_trait]
pub trait VectorBackend: Send + Sync {
    /// Store or overwrite documents by id.
    ///
    /// Embeds all texts in one provider call. Either every document in the
    /// batch is embedded and stored, or the whole call fails; a re-upsert
    /// of an existing id replaces it without duplicating. Empty input is a
    /// no-op.
    async fn upsert(&self, docs: &[VectorDoc]) -> RagResult<()>;

    /// Rank stored documents against a free-text query.
    ///
    /// Returns at most `opts.top_k` hits sorted by non-increasing score,
    /// with deterministic tie order.
    async fn search(&self, query: &str, opts: &SearchOptions) -> RagResult<Vec<VectorHit>>;
}
