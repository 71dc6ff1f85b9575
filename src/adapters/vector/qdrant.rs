//! Qdrant REST vector backend.
//!
//! Delegates storage and ANN search to a remote Qdrant instance while
//! satisfying the same `upsert`/`search` contract as the in-memory
//! backend. Owns the collection lifecycle (lazy idempotent create with
//! cosine distance) and the mapping between logical document ids and the
//! UUID-shaped point ids the store requires. No retries happen here;
//! retry policy belongs to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use xxhash_rust::xxh3::xxh3_64;

use crate::domain::errors::{body_excerpt, RagError, RagResult};
use crate::domain::models::{SourceType, VectorDoc, VectorHit};
use crate::domain::ports::{EmbeddingProvider, SearchOptions, VectorBackend};

/// Qdrant-backed vector store.
pub struct QdrantVectorBackend {
    http: reqwest::Client,
    base_url: String,
    collection: String,
    vector_size: usize,
    provider: Arc<dyn EmbeddingProvider>,
    /// Local guard for the lazy collection create. Racing callers may both
    /// attempt the create; the remote side's duplicate-create response is
    /// tolerated.
    collection_ready: Mutex<bool>,
}

impl QdrantVectorBackend {
    pub fn new(
        url: impl Into<String>,
        collection: impl Into<String>,
        vector_size: usize,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: url.into().trim_end_matches('/').to_string(),
            collection: collection.into(),
            vector_size,
            provider,
            collection_ready: Mutex::new(false),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    /// Make sure the collection exists with the configured schema.
    async fn ensure_collection(&self) -> RagResult<()> {
        let mut ready = self.collection_ready.lock().await;
        if *ready {
            return Ok(());
        }

        let url = self.collection_url();
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RagError::Backend(format!("collection lookup failed: {e}")))?;

        if !response.status().is_success() {
            let create = CreateCollectionRequest {
                vectors: VectorParams {
                    size: self.vector_size,
                    distance: "Cosine",
                },
            };
            let response = self
                .http
                .put(&url)
                .json(&create)
                .send()
                .await
                .map_err(|e| RagError::Backend(format!("collection create failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // A concurrent caller may have won the create race.
                let duplicate =
                    status == StatusCode::CONFLICT || body.to_lowercase().contains("already exists");
                if !duplicate {
                    return Err(RagError::Backend(format!(
                        "create collection {} failed ({status}): {}",
                        self.collection,
                        body_excerpt(&body)
                    )));
                }
            } else {
                tracing::info!(
                    collection = %self.collection,
                    size = self.vector_size,
                    "created vector collection"
                );
            }
        }

        *ready = true;
        Ok(())
    }

    fn check_dimension(&self, vector: &[f32]) -> RagResult<()> {
        if vector.len() != self.vector_size {
            return Err(RagError::Config(format!(
                "embedding dimension {} does not match configured vector size {}",
                vector.len(),
                self.vector_size
            )));
        }
        Ok(())
    }
}

/// Derive the stable point id for a logical document id.
///
/// The store requires UUID-shaped point ids. A non-cryptographic hash of
/// the logical id seeds a linear-congruential byte generator whose output
/// is formatted as a version-4 UUID. Determinism is the load-bearing
/// property: the same logical id must always map to the same point id so
/// re-upserts overwrite instead of duplicating.
pub(crate) fn point_id_for(doc_id: &str) -> String {
    // Knuth's MMIX LCG constants.
    const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
    const INCREMENT: u64 = 1_442_695_040_888_963_407;

    let mut state = xxh3_64(doc_id.as_bytes());
    let mut bytes = [0u8; 16];
    for byte in &mut bytes {
        state = state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        *byte = (state >> 56) as u8;
    }

    uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
}

#[async_trait]
impl VectorBackend for QdrantVectorBackend {
    async fn upsert(&self, docs: &[VectorDoc]) -> RagResult<()> {
        if docs.is_empty() {
            return Ok(());
        }
        self.ensure_collection().await?;

        let texts: Vec<String> = docs.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.provider.embed(&texts).await?;
        if embeddings.len() != docs.len() {
            return Err(RagError::Provider(format!(
                "provider returned {} vectors for {} documents",
                embeddings.len(),
                docs.len()
            )));
        }

        let mut points = Vec::with_capacity(docs.len());
        for (doc, vector) in docs.iter().zip(embeddings) {
            self.check_dimension(&vector)?;
            points.push(PointStruct {
                id: point_id_for(&doc.id),
                vector,
                payload: PointPayload {
                    doc_id: doc.id.clone(),
                    entity_id: doc.entity_id.clone(),
                    text: doc.text.clone(),
                    source_type: doc.source_type,
                    url: doc.url.clone(),
                },
            });
        }

        // wait=true makes the write durable before we report success.
        let url = format!("{}/points", self.collection_url());
        let response = self
            .http
            .put(&url)
            .query(&[("wait", "true")])
            .json(&UpsertPointsRequest { points })
            .send()
            .await
            .map_err(|e| RagError::Backend(format!("points upsert failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RagError::Backend(format!(
                "points upsert failed ({status}): {}",
                body_excerpt(&body)
            )));
        }

        tracing::debug!(
            collection = %self.collection,
            count = docs.len(),
            "upserted points"
        );
        Ok(())
    }

    async fn search(&self, query: &str, opts: &SearchOptions) -> RagResult<Vec<VectorHit>> {
        self.ensure_collection().await?;

        let vector = self.provider.embed_one(query).await?;
        self.check_dimension(&vector)?;

        let filter = opts.entity_id.as_ref().map(|entity_id| Filter {
            must: vec![FieldCondition {
                key: "entity_id".to_string(),
                match_value: MatchValue {
                    value: entity_id.clone(),
                },
            }],
        });

        let url = format!("{}/points/search", self.collection_url());
        let response = self
            .http
            .post(&url)
            .json(&SearchPointsRequest {
                vector,
                limit: opts.top_k,
                with_payload: true,
                filter,
            })
            .send()
            .await
            .map_err(|e| RagError::Backend(format!("points search failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RagError::Backend(format!(
                "points search failed ({status}): {}",
                body_excerpt(&body)
            )));
        }

        let result: SearchPointsResponse = response
            .json()
            .await
            .map_err(|e| RagError::Backend(format!("failed to parse search response: {e}")))?;

        result
            .result
            .into_iter()
            .map(|point| {
                let payload = point.payload.ok_or_else(|| {
                    RagError::Backend("search result point has no payload".to_string())
                })?;
                Ok(VectorHit {
                    id: payload.doc_id,
                    score: point.score,
                    text: payload.text,
                    entity_id: payload.entity_id,
                    url: payload.url,
                })
            })
            .collect()
    }
}

// -- Qdrant REST request/response types --

#[derive(Debug, Serialize)]
struct CreateCollectionRequest {
    vectors: VectorParams,
}

#[derive(Debug, Serialize)]
struct VectorParams {
    size: usize,
    distance: &'static str,
}

#[derive(Debug, Serialize)]
struct UpsertPointsRequest {
    points: Vec<PointStruct>,
}

#[derive(Debug, Serialize)]
struct PointStruct {
    id: String,
    vector: Vec<f32>,
    payload: PointPayload,
}

/// Payload stored alongside each point, carrying everything needed to map
/// a search result back to a [`VectorHit`].
#[derive(Debug, Serialize, Deserialize)]
struct PointPayload {
    doc_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entity_id: Option<String>,
    text: String,
    source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct SearchPointsRequest {
    vector: Vec<f32>,
    limit: usize,
    with_payload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Filter>,
}

#[derive(Debug, Serialize)]
struct Filter {
    must: Vec<FieldCondition>,
}

#[derive(Debug, Serialize)]
struct FieldCondition {
    key: String,
    #[serde(rename = "match")]
    match_value: MatchValue,
}

#[derive(Debug, Serialize)]
struct MatchValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct SearchPointsResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    score: f32,
    #[serde(default)]
    payload: Option<PointPayload>,
}
