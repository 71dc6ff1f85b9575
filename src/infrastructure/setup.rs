//! Stack wiring.
//!
//! The single construction point for the retrieval core: configuration in,
//! fully wired services out. The concrete embedding provider and vector
//! backend are chosen here and injected behind their port traits; nothing
//! downstream branches on provider or backend kind.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::{create_embedding_provider, create_vector_backend, HttpContentSource};
use crate::domain::models::Config;
use crate::domain::ports::ContentSource;
use crate::infrastructure::config::ConfigLoader;
use crate::services::{IndexingService, QueryService};

/// The wired retrieval core.
pub struct RagStack {
    /// Entity bundle indexing.
    pub indexing: IndexingService,
    /// Search and cited answers.
    pub query: QueryService,
}

/// Build the retrieval core from an already-loaded configuration.
pub fn build_stack(config: &Config) -> Result<RagStack> {
    let provider = create_embedding_provider(&config.embeddings)
        .context("failed to construct embedding provider")?;
    let backend = create_vector_backend(&config.vector, Arc::clone(&provider))
        .context("failed to construct vector backend")?;
    let source: Arc<dyn ContentSource> = Arc::new(
        HttpContentSource::new(&config.upstream)
            .context("failed to construct upstream content source")?,
    );

    tracing::info!(
        provider = provider.name(),
        dimension = provider.dimension(),
        "retrieval stack constructed"
    );

    Ok(RagStack {
        indexing: IndexingService::new(source, Arc::clone(&backend)),
        query: QueryService::new(backend),
    })
}

/// Load configuration from disk/environment and build the retrieval core.
pub fn build_stack_from_env() -> Result<RagStack> {
    let config = ConfigLoader::load()?;
    build_stack(&config)
}
