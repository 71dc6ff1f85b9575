//! Deterministic stand-in embedding provider.
//!
//! Maps text to a unit vector derived from a SHA-256 digest of
//! `"{model}:{text}"`, so the same (model, text) pair yields a
//! bit-identical vector across processes and runs. Unit-normalized output
//! makes dot product equal cosine similarity. Used as the default provider
//! for offline operation and tests.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::errors::RagResult;
use crate::domain::ports::EmbeddingProvider;

/// Hash-based deterministic embedding provider.
#[derive(Debug, Clone)]
pub struct StubEmbeddingProvider {
    model: String,
    dimension: usize,
}

impl StubEmbeddingProvider {
    /// Create a provider for the given model identifier and dimensionality.
    pub fn new(model: impl Into<String>, dimension: usize) -> Self {
        Self {
            model: model.into(),
            dimension,
        }
    }

    /// Expand a digest into a unit vector of `dimension` components.
    ///
    /// Digest bytes are cycled, each byte b mapped to b/127.5 - 1, then the
    /// vector is L2-normalized. A zero norm is treated as 1.
    fn digest_to_unit_vector(&self, digest: &[u8]) -> Vec<f32> {
        let mut v: Vec<f32> = (0..self.dimension)
            .map(|i| f32::from(digest[i % digest.len()]) / 127.5 - 1.0)
            .collect();

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm = if norm == 0.0 { 1.0 } else { norm };
        for x in &mut v {
            *x /= norm;
        }
        v
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut hasher = Sha256::new();
        hasher.update(self.model.as_bytes());
        hasher.update(b":");
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();
        self.digest_to_unit_vector(&digest)
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbeddingProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, texts: &[String]) -> RagResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}
