//! Process-local exact-search vector backend.
//!
//! Holds every document and its embedding in a map for the process
//! lifetime and scores searches by brute force. O(n·d) per search, which
//! is the intended trade-off for the embedded/offline use case; no index
//! structure is built.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{VectorDoc, VectorHit};
use crate::domain::ports::{EmbeddingProvider, SearchOptions, VectorBackend};

struct StoredDoc {
    doc: VectorDoc,
    embedding: Vec<f32>,
}

/// Exact brute-force backend over a process-local map.
pub struct InMemoryVectorBackend {
    provider: Arc<dyn EmbeddingProvider>,
    store: RwLock<HashMap<String, StoredDoc>>,
}

impl InMemoryVectorBackend {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// True when nothing has been indexed yet.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[async_trait]
impl VectorBackend for InMemoryVectorBackend {
    async fn upsert(&self, docs: &[VectorDoc]) -> RagResult<()> {
        if docs.is_empty() {
            return Ok(());
        }

        // Embed the whole batch before touching the map, so a provider
        // failure stores nothing.
        let texts: Vec<String> = docs.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.provider.embed(&texts).await?;
        if embeddings.len() != docs.len() {
            return Err(RagError::Provider(format!(
                "provider returned {} vectors for {} documents",
                embeddings.len(),
                docs.len()
            )));
        }

        let mut store = self.store.write().await;
        for (doc, embedding) in docs.iter().zip(embeddings) {
            store.insert(
                doc.id.clone(),
                StoredDoc {
                    doc: doc.clone(),
                    embedding,
                },
            );
        }

        tracing::debug!(count = docs.len(), "upserted documents into memory backend");
        Ok(())
    }

    async fn search(&self, query: &str, opts: &SearchOptions) -> RagResult<Vec<VectorHit>> {
        let query_embedding = self.provider.embed_one(query).await?;

        let store = self.store.read().await;
        let mut hits: Vec<VectorHit> = store
            .values()
            .filter(|stored| match &opts.entity_id {
                Some(scope) => stored.doc.entity_id.as_deref() == Some(scope.as_str()),
                None => true,
            })
            .map(|stored| VectorHit {
                id: stored.doc.id.clone(),
                score: dot(&query_embedding, &stored.embedding),
                text: stored.doc.text.clone(),
                entity_id: stored.doc.entity_id.clone(),
                url: stored.doc.url.clone(),
            })
            .collect();

        // Score descending; id ascending on ties so map iteration order
        // never leaks into results.
        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(opts.top_k);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::embeddings::StubEmbeddingProvider;
    use crate::domain::models::SourceType;

    fn backend() -> InMemoryVectorBackend {
        InMemoryVectorBackend::new(Arc::new(StubEmbeddingProvider::new("stub-embed", 64)))
    }

    fn doc(id: &str, entity_id: Option<&str>, text: &str) -> VectorDoc {
        VectorDoc {
            id: id.to_string(),
            entity_id: entity_id.map(str::to_string),
            text: text.to_string(),
            source_type: SourceType::CanonicalContent,
            url: None,
        }
    }

    #[tokio::test]
    async fn test_empty_upsert_is_noop() {
        let backend = backend();
        backend.upsert(&[]).await.unwrap();
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_same_id() {
        let backend = backend();
        backend
            .upsert(&[doc("d1", Some("e1"), "first version")])
            .await
            .unwrap();
        backend
            .upsert(&[doc("d1", Some("e1"), "second version")])
            .await
            .unwrap();

        assert_eq!(backend.len().await, 1);
        let hits = backend
            .search("version", &SearchOptions::top_k(5))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "second version");
    }

    #[tokio::test]
    async fn test_search_orders_by_score_descending() {
        let backend = backend();
        backend
            .upsert(&[
                doc("a", Some("e1"), "Acme makes widgets"),
                doc("b", Some("e1"), "bananas are yellow"),
                doc("c", Some("e1"), "widgets from Acme"),
            ])
            .await
            .unwrap();

        let hits = backend
            .search("Acme makes widgets", &SearchOptions::top_k(3))
            .await
            .unwrap();
        assert_eq!(hits.len(), 3);
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // The exact stored text is the best match for its own query.
        assert_eq!(hits[0].id, "a");
    }

    #[tokio::test]
    async fn test_search_respects_top_k() {
        let backend = backend();
        let docs: Vec<VectorDoc> = (0..10)
            .map(|i| doc(&format!("d{i}"), Some("e1"), &format!("text number {i}")))
            .collect();
        backend.upsert(&docs).await.unwrap();

        let hits = backend
            .search("text", &SearchOptions::top_k(4))
            .await
            .unwrap();
        assert_eq!(hits.len(), 4);
    }

    #[tokio::test]
    async fn test_scoped_search_excludes_other_entities_and_unowned_docs() {
        let backend = backend();
        backend
            .upsert(&[
                doc("mine", Some("e1"), "Acme widgets"),
                doc("theirs", Some("e2"), "Acme widgets"),
                doc("unowned", None, "Acme widgets"),
            ])
            .await
            .unwrap();

        let hits = backend
            .search("Acme widgets", &SearchOptions::scoped("e1", 10))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "mine");
        assert_eq!(hits[0].entity_id.as_deref(), Some("e1"));
    }

    #[tokio::test]
    async fn test_identical_inputs_yield_identical_results() {
        let backend = backend();
        let docs: Vec<VectorDoc> = (0..20)
            .map(|i| doc(&format!("d{i:02}"), Some("e1"), "identical text"))
            .collect();
        backend.upsert(&docs).await.unwrap();

        let first = backend
            .search("identical text", &SearchOptions::top_k(20))
            .await
            .unwrap();
        let second = backend
            .search("identical text", &SearchOptions::top_k(20))
            .await
            .unwrap();
        let first_ids: Vec<&str> = first.iter().map(|h| h.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
        // All scores tie, so the order falls back to ids.
        let mut sorted = first_ids.clone();
        sorted.sort_unstable();
        assert_eq!(first_ids, sorted);
    }
}
