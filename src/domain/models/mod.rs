//! Domain models for the retrieval core.

pub mod bundle;
pub mod config;
pub mod document;

pub use bundle::{CanonicalContent, CanonicalFaqItem, EntityBundle, SourceDocument};
pub use config::{
    Config, EmbeddingProviderKind, EmbeddingsConfig, LoggingConfig, UpstreamConfig,
    VectorBackendKind, VectorConfig,
};
pub use document::{SourceType, VectorDoc, VectorHit};
