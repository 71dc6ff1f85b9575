//! Embedding provider adapters.

pub mod remote;
pub mod stub;

pub use remote::RemoteEmbeddingProvider;
pub use stub::StubEmbeddingProvider;

use std::sync::Arc;

use crate::domain::errors::RagResult;
use crate::domain::models::{EmbeddingProviderKind, EmbeddingsConfig};
use crate::domain::ports::EmbeddingProvider;

/// Construct the configured embedding provider.
///
/// This is the only place that branches on the provider kind; everything
/// downstream sees `Arc<dyn EmbeddingProvider>`.
pub fn create_embedding_provider(
    config: &EmbeddingsConfig,
) -> RagResult<Arc<dyn EmbeddingProvider>> {
    match config.provider {
        EmbeddingProviderKind::Stub => Ok(Arc::new(StubEmbeddingProvider::new(
            config.model.clone(),
            config.dimension,
        ))),
        EmbeddingProviderKind::Remote => {
            Ok(Arc::new(RemoteEmbeddingProvider::new(config)?))
        }
    }
}
