//! Configuration loader with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::{Config, VectorBackendKind};

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Embedding model cannot be empty")]
    EmptyEmbeddingModel,

    #[error("Invalid embedding dimension: {0}. Must be at least 1")]
    InvalidDimension(usize),

    #[error("Invalid vector size: {0}. Must be at least 1")]
    InvalidVectorSize(usize),

    #[error("vector.backend = qdrant requires vector.qdrant_url")]
    MissingQdrantUrl,

    #[error(
        "Embedding dimension ({0}) must equal vector.vector_size ({1}) for the qdrant backend"
    )]
    DimensionMismatch(usize, usize),

    #[error("Upstream base_url cannot be empty")]
    EmptyUpstreamUrl,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `sibyl.yaml` in the working directory
    /// 3. Environment variables (`SIBYL_*` prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("sibyl.yaml"))
            .merge(Env::prefixed("SIBYL_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.embeddings.model.trim().is_empty() {
            return Err(ConfigError::EmptyEmbeddingModel);
        }
        if config.embeddings.dimension == 0 {
            return Err(ConfigError::InvalidDimension(config.embeddings.dimension));
        }
        if config.vector.vector_size == 0 {
            return Err(ConfigError::InvalidVectorSize(config.vector.vector_size));
        }

        if config.vector.backend == VectorBackendKind::Qdrant {
            if config.vector.qdrant_url.as_deref().unwrap_or("").is_empty() {
                return Err(ConfigError::MissingQdrantUrl);
            }
            if config.embeddings.dimension != config.vector.vector_size {
                return Err(ConfigError::DimensionMismatch(
                    config.embeddings.dimension,
                    config.vector.vector_size,
                ));
            }
        }

        if config.upstream.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyUpstreamUrl);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
