//! Remote embedding provider adapter.
//!
//! Calls an OpenAI-compatible `/embeddings` endpoint. Compatible with any
//! server speaking that contract (OpenAI, Azure OpenAI, local inference
//! servers). The response must contain exactly one vector per requested
//! text; anything else fails the whole call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{body_excerpt, RagError, RagResult};
use crate::domain::models::EmbeddingsConfig;
use crate::domain::ports::EmbeddingProvider;

/// Environment variable consulted when no API key is configured.
const API_KEY_ENV: &str = "SIBYL_EMBEDDINGS_API_KEY";

/// OpenAI-compatible embedding provider.
pub struct RemoteEmbeddingProvider {
    model: String,
    dimension: usize,
    base_url: String,
    api_key: Option<String>,
    max_batch_size: usize,
    http: reqwest::Client,
}

impl RemoteEmbeddingProvider {
    /// Build a provider from the embeddings configuration section.
    pub fn new(config: &EmbeddingsConfig) -> RagResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RagError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            model: config.model.clone(),
            dimension: config.dimension,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            max_batch_size: config.max_batch_size.max(1),
            http,
        })
    }

    fn api_key(&self) -> RagResult<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .ok_or_else(|| {
                RagError::Config(format!(
                    "remote embeddings API key not set. Set {API_KEY_ENV} or configure embeddings.api_key"
                ))
            })
    }

    async fn call_embeddings_api(&self, texts: &[String]) -> RagResult<Vec<Vec<f32>>> {
        let api_key = self.api_key()?;
        let url = format!("{}/embeddings", self.base_url);

        let request_body = EmbeddingsRequest {
            model: self.model.clone(),
            input: texts.to_vec(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RagError::Provider(format!("embeddings request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(RagError::Provider(format!(
                "embeddings endpoint returned {status}: {}",
                body_excerpt(&body)
            )));
        }

        let result: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| RagError::Provider(format!("failed to parse embeddings response: {e}")))?;

        if result.data.len() != texts.len() {
            return Err(RagError::Provider(format!(
                "embeddings response contained {} vectors for {} texts",
                result.data.len(),
                texts.len()
            )));
        }

        // Sort by index to maintain input order
        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for RemoteEmbeddingProvider {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, texts: &[String]) -> RagResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.max_batch_size) {
            let vectors = self.call_embeddings_api(chunk).await?;
            all_vectors.extend(vectors);
        }

        Ok(all_vectors)
    }
}

// -- OpenAI-compatible request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
