//! Configuration model for the retrieval core.
//!
//! Defaults target the fully offline setup: deterministic stub embeddings
//! and the in-memory backend. Selecting the remote provider or the qdrant
//! backend requires the corresponding section to be filled in; validation
//! lives in the config loader.

use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Embedding provider configuration
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,

    /// Vector backend configuration
    #[serde(default)]
    pub vector: VectorConfig,

    /// Upstream content source configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which embedding provider to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    /// Deterministic hash-based stand-in, for offline use and tests.
    Stub,
    /// OpenAI-compatible remote embeddings endpoint.
    Remote,
}

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingsConfig {
    /// Provider kind: stub or remote
    #[serde(default = "default_embedding_provider")]
    pub provider: EmbeddingProviderKind,

    /// Embedding model identifier
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Vector dimensionality produced by the provider
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,

    /// Base URL for the remote provider
    #[serde(default = "default_remote_base_url")]
    pub base_url: String,

    /// API key for the remote provider. Falls back to `SIBYL_EMBEDDINGS_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout for the remote provider, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum texts per single remote request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

const fn default_embedding_provider() -> EmbeddingProviderKind {
    EmbeddingProviderKind::Stub
}

fn default_embedding_model() -> String {
    "stub-embed".to_string()
}

const fn default_embedding_dimension() -> usize {
    64
}

fn default_remote_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_batch_size() -> usize {
    2048
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            provider: default_embedding_provider(),
            model: default_embedding_model(),
            dimension: default_embedding_dimension(),
            base_url: default_remote_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

/// Which vector backend to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorBackendKind {
    /// Process-local exact search.
    InMemory,
    /// External Qdrant instance over REST.
    Qdrant,
}

/// Vector backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VectorConfig {
    /// Backend kind: in_memory or qdrant
    #[serde(default = "default_vector_backend")]
    pub backend: VectorBackendKind,

    /// Qdrant base URL, required when backend = qdrant
    #[serde(default)]
    pub qdrant_url: Option<String>,

    /// Collection name in the external store
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Vector size configured on the external collection
    #[serde(default = "default_vector_size")]
    pub vector_size: usize,
}

const fn default_vector_backend() -> VectorBackendKind {
    VectorBackendKind::InMemory
}

fn default_collection_name() -> String {
    "entity_chunks".to_string()
}

const fn default_vector_size() -> usize {
    64
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            backend: default_vector_backend(),
            qdrant_url: None,
            collection_name: default_collection_name(),
            vector_size: default_vector_size(),
        }
    }
}

/// Upstream content source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpstreamConfig {
    /// Base URL of the service exposing the entity bundle endpoint
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_upstream_base_url() -> String {
    "http://localhost:8001".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
