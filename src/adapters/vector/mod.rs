//! Vector backend adapters.

pub mod in_memory;
pub mod qdrant;

pub use in_memory::InMemoryVectorBackend;
pub use qdrant::QdrantVectorBackend;

use std::sync::Arc;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{VectorBackendKind, VectorConfig};
use crate::domain::ports::{EmbeddingProvider, VectorBackend};

/// Construct the configured vector backend.
///
/// This is the only place that branches on the backend kind; everything
/// downstream sees `Arc<dyn VectorBackend>`. The qdrant variant fails fast
/// when required settings are missing or when the provider's dimensionality
/// disagrees with the configured vector size.
pub fn create_vector_backend(
    config: &VectorConfig,
    provider: Arc<dyn EmbeddingProvider>,
) -> RagResult<Arc<dyn VectorBackend>> {
    match config.backend {
        VectorBackendKind::InMemory => Ok(Arc::new(InMemoryVectorBackend::new(provider))),
        VectorBackendKind::Qdrant => {
            let url = config.qdrant_url.as_ref().ok_or_else(|| {
                RagError::Config(
                    "vector.backend = qdrant requires vector.qdrant_url".to_string(),
                )
            })?;
            if config.collection_name.trim().is_empty() {
                return Err(RagError::Config(
                    "vector.collection_name must not be empty".to_string(),
                ));
            }
            if provider.dimension() != config.vector_size {
                return Err(RagError::Config(format!(
                    "embedding provider dimension {} does not match vector.vector_size {}",
                    provider.dimension(),
                    config.vector_size
                )));
            }
            Ok(Arc::new(QdrantVectorBackend::new(
                url.clone(),
                config.collection_name.clone(),
                config.vector_size,
                provider,
            )))
        }
    }
}
