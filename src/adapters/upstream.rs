//! HTTP adapter for the upstream content source.
//!
//! Fetches entity bundles from the service that owns entity records,
//! canonical copy, and ingested source documents. Any non-success response
//! is fatal to the indexing run that requested it.

use async_trait::async_trait;

use crate::domain::errors::{body_excerpt, RagError, RagResult};
use crate::domain::models::{EntityBundle, UpstreamConfig};
use crate::domain::ports::ContentSource;

/// HTTP client for the upstream entity bundle endpoint.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpContentSource {
    /// Build a client from the upstream configuration section.
    pub fn new(config: &UpstreamConfig) -> RagResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RagError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_entity_bundle(&self, entity_id: &str) -> RagResult<EntityBundle> {
        let url = format!("{}/indexing/entity-bundle/{entity_id}", self.base_url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            RagError::UpstreamFetch(format!("GET /indexing/entity-bundle/{entity_id}: {e}"))
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(RagError::UpstreamFetch(format!(
                "GET /indexing/entity-bundle/{entity_id} returned {status}: {}",
                body_excerpt(&body)
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            RagError::UpstreamFetch(format!(
                "GET /indexing/entity-bundle/{entity_id} returned an unparsable bundle: {e}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base_url: &str) -> HttpContentSource {
        HttpContentSource::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_parses_bundle() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/indexing/entity-bundle/e1")
            .with_status(200)
            .with_body(
                r#"{
                    "entity": {"id": "e1", "displayName": "Acme"},
                    "canonicalContent": {"entityId": "e1", "aboutShort": "Acme makes widgets."},
                    "sourceDocuments": []
                }"#,
            )
            .create_async()
            .await;

        let bundle = source(&server.url()).fetch_entity_bundle("e1").await.unwrap();
        assert_eq!(bundle.entity["id"], "e1");
        assert_eq!(
            bundle.canonical_content.unwrap().about_short,
            "Acme makes widgets."
        );
    }

    #[tokio::test]
    async fn test_non_success_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/indexing/entity-bundle/missing")
            .with_status(404)
            .with_body(r#"{"error": "entity not found"}"#)
            .create_async()
            .await;

        let err = source(&server.url())
            .fetch_entity_bundle("missing")
            .await
            .unwrap_err();
        match err {
            RagError::UpstreamFetch(msg) => {
                assert!(msg.contains("404"));
                assert!(msg.contains("entity not found"));
            }
            other => panic!("expected UpstreamFetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparsable_bundle_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/indexing/entity-bundle/e1")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let err = source(&server.url())
            .fetch_entity_bundle("e1")
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::UpstreamFetch(_)));
    }
}
