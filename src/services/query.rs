//! Query and answer engine.
//!
//! Embeds free-text queries, ranks indexed documents through the active
//! vector backend, and assembles a cited textual answer from the top hits.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::errors::RagResult;
use crate::domain::models::VectorHit;
use crate::domain::ports::{SearchOptions, VectorBackend, DEFAULT_TOP_K};

/// Fixed answer returned when a scoped search finds nothing.
pub const NO_MATERIAL_ANSWER: &str = "No indexed material found for this query.";

/// Minimum candidate pool fetched before scope post-filtering.
const SCOPE_CANDIDATE_FLOOR: usize = 10;

/// Ranked hits for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticSearchResponse {
    pub query: String,
    pub hits: Vec<VectorHit>,
}

/// One supporting source for an answer.
///
/// `url` serializes as `null` when the underlying document had none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub id: String,
    pub url: Option<String>,
    pub score: f32,
}

/// A narrative answer with its supporting citations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub answer: String,
    pub citations: Vec<Citation>,
}

/// Search and answer operations over the active backend.
pub struct QueryService {
    backend: Arc<dyn VectorBackend>,
}

impl QueryService {
    pub fn new(backend: Arc<dyn VectorBackend>) -> Self {
        Self { backend }
    }

    /// Rank indexed documents against a query, optionally restricted to a
    /// set of entities.
    ///
    /// Scoping works as a post-filter over a broader unscoped search so
    /// that no backend needs to support multi-id filters directly: the
    /// backend is asked for `max(top_k, 10)` candidates, hits outside the
    /// scope are dropped, and the remainder is truncated to `top_k`.
    pub async fn semantic_search(
        &self,
        query: &str,
        entity_scope: Option<&[String]>,
        top_k: Option<usize>,
    ) -> RagResult<SemanticSearchResponse> {
        let top_k = top_k.unwrap_or(DEFAULT_TOP_K);
        let candidate_k = top_k.max(SCOPE_CANDIDATE_FLOOR);

        let mut hits = self
            .backend
            .search(query, &SearchOptions::top_k(candidate_k))
            .await?;

        if let Some(scope) = entity_scope {
            hits.retain(|hit| {
                hit.entity_id
                    .as_ref()
                    .is_some_and(|id| scope.iter().any(|s| s == id))
            });
        }
        hits.truncate(top_k);

        tracing::debug!(query, hit_count = hits.len(), "semantic search served");
        Ok(SemanticSearchResponse {
            query: query.to_string(),
            hits,
        })
    }

    /// Answer a query from indexed material, optionally scoped to one
    /// entity.
    ///
    /// With zero hits the fixed no-material answer is returned with empty
    /// citations; otherwise hit texts are concatenated in ranked order and
    /// each hit contributes one citation.
    pub async fn answer(
        &self,
        query: &str,
        entity_id: Option<&str>,
        top_k: Option<usize>,
    ) -> RagResult<AnswerResponse> {
        let top_k = top_k.unwrap_or(DEFAULT_TOP_K);
        let opts = SearchOptions {
            entity_id: entity_id.map(str::to_string),
            top_k,
        };

        let hits = self.backend.search(query, &opts).await?;
        if hits.is_empty() {
            return Ok(AnswerResponse {
                answer: NO_MATERIAL_ANSWER.to_string(),
                citations: Vec::new(),
            });
        }

        let answer = hits
            .iter()
            .map(|hit| hit.text.trim())
            .collect::<Vec<_>>()
            .join("\n\n");
        let citations = hits
            .iter()
            .map(|hit| Citation {
                id: hit.id.clone(),
                url: hit.url.clone(),
                score: hit.score,
            })
            .collect();

        Ok(AnswerResponse { answer, citations })
    }
}
