//! Embedding provider port for semantic vector generation.
//!
//! Defines the trait for embedding providers that convert text into
//! dense vector representations for semantic similarity search. A provider
//! is a pure function of its configured model and the input text: it owns
//! no storage.

use async_trait::async_trait;

use crate::domain::errors::{RagError, RagResult};

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name (e.g., "stub", "remote").
    fn name(&self) -> &'static str;

    /// Embedding dimension for this provider/model.
    fn dimension(&self) -> usize;

    /// Generate embeddings for multiple texts in a single call.
    ///
    /// Returns exactly one vector per input text, in input order.
    /// Implementations must fail the whole call rather than return a
    /// partial result.
    async fn embed(&self, texts: &[String]) -> RagResult<Vec<Vec<f32>>>;

    /// Generate an embedding for a single text.
    async fn embed_one(&self, text: &str) -> RagResult<Vec<f32>> {
        let texts = [text.to_string()];
        let mut vectors = self.embed(&texts).await?;
        vectors
            .pop()
            .ok_or_else(|| RagError::Provider("empty embedding response".to_string()))
    }
}
