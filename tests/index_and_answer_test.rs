//! End-to-end flow: index an entity bundle served by a mocked upstream,
//! then search and answer against the in-memory backend.

use sibyl::domain::models::Config;
use sibyl::infrastructure::build_stack;
use sibyl::services::NO_MATERIAL_ANSWER;
use sibyl::RagError;

const BUNDLE_BODY: &str = r#"{
    "entity": {
        "id": "e1",
        "type": "brand",
        "slug": "acme",
        "displayName": "Acme",
        "websiteUrl": "https://acme.example"
    },
    "canonicalContent": {
        "entityId": "e1",
        "aboutShort": "Acme makes widgets.",
        "aboutLong": "Acme makes widgets for developers.",
        "faq": [{"question": "What?", "answer": "Widgets"}]
    },
    "sourceDocuments": [{
        "id": "doc1",
        "url": "https://acme.example",
        "content": "<html><body>Acme widgets</body></html>",
        "contentType": "text/html",
        "ingestedAt": "2025-06-01T12:00:00Z"
    }]
}"#;

fn stack_for(server: &mockito::Server) -> sibyl::RagStack {
    let mut config = Config::default();
    config.upstream.base_url = server.url();
    build_stack(&config).expect("default stack should build")
}

#[tokio::test]
async fn test_index_entity_counts_all_bundle_docs() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/indexing/entity-bundle/e1")
        .with_status(200)
        .with_body(BUNDLE_BODY)
        .create_async()
        .await;

    let stack = stack_for(&server);
    let outcome = stack.indexing.index_entity("e1").await.unwrap();

    // Entity record + two summaries + one FAQ + one source document.
    assert_eq!(outcome.indexed_count, 5);
    assert!(outcome.indexed_count >= 3);
}

#[tokio::test]
async fn test_reindexing_is_idempotent() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/indexing/entity-bundle/e1")
        .with_status(200)
        .with_body(BUNDLE_BODY)
        .expect(2)
        .create_async()
        .await;

    let stack = stack_for(&server);
    let first = stack.indexing.index_entity("e1").await.unwrap();
    let second = stack.indexing.index_entity("e1").await.unwrap();
    assert_eq!(first.indexed_count, second.indexed_count);

    // No duplicates are retrievable: every hit id is unique and the total
    // never exceeds the indexed count.
    let response = stack
        .query
        .semantic_search("Acme widgets", None, Some(50))
        .await
        .unwrap();
    let mut ids: Vec<&str> = response.hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(response.hits.len(), first.indexed_count);
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), first.indexed_count);
}

#[tokio::test]
async fn test_answer_returns_material_with_citations() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/indexing/entity-bundle/e1")
        .with_status(200)
        .with_body(BUNDLE_BODY)
        .create_async()
        .await;

    let stack = stack_for(&server);
    stack.indexing.index_entity("e1").await.unwrap();

    let response = stack
        .query
        .answer("What does Acme do?", Some("e1"), Some(3))
        .await
        .unwrap();

    assert!(!response.answer.is_empty());
    assert_ne!(response.answer, NO_MATERIAL_ANSWER);
    assert!(!response.citations.is_empty());
    for citation in &response.citations {
        assert!(citation.score.is_finite());
    }
}

#[tokio::test]
async fn test_html_source_is_indexed_stripped() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/indexing/entity-bundle/e1")
        .with_status(200)
        .with_body(BUNDLE_BODY)
        .create_async()
        .await;

    let stack = stack_for(&server);
    stack.indexing.index_entity("e1").await.unwrap();

    let response = stack
        .query
        .semantic_search("Acme widgets", None, Some(10))
        .await
        .unwrap();
    let source_hit = response
        .hits
        .iter()
        .find(|h| h.id == "source:doc1")
        .expect("source document should be indexed");
    assert_eq!(source_hit.text, "Acme widgets");
    assert_eq!(source_hit.url.as_deref(), Some("https://acme.example"));
}

#[tokio::test]
async fn test_answer_for_unindexed_entity_is_no_material() {
    let server = mockito::Server::new_async().await;
    let stack = stack_for(&server);

    let response = stack
        .query
        .answer("What does Acme do?", Some("ghost"), None)
        .await
        .unwrap();
    assert_eq!(response.answer, NO_MATERIAL_ANSWER);
    assert!(response.citations.is_empty());
}

#[tokio::test]
async fn test_scoped_answer_never_leaks_other_entities() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/indexing/entity-bundle/e1")
        .with_status(200)
        .with_body(BUNDLE_BODY)
        .create_async()
        .await;

    let stack = stack_for(&server);
    stack.indexing.index_entity("e1").await.unwrap();

    let response = stack
        .query
        .answer("What does Acme do?", Some("e2"), None)
        .await
        .unwrap();
    assert_eq!(response.answer, NO_MATERIAL_ANSWER);
}

#[tokio::test]
async fn test_upstream_failure_propagates() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/indexing/entity-bundle/e1")
        .with_status(502)
        .with_body(r#"{"error": "bundle source down"}"#)
        .create_async()
        .await;

    let stack = stack_for(&server);
    let err = stack.indexing.index_entity("e1").await.unwrap_err();
    match err {
        RagError::UpstreamFetch(msg) => {
            assert!(msg.contains("502"));
            assert!(msg.contains("bundle source down"));
        }
        other => panic!("expected UpstreamFetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_hits_are_rank_ordered() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/indexing/entity-bundle/e1")
        .with_status(200)
        .with_body(BUNDLE_BODY)
        .create_async()
        .await;

    let stack = stack_for(&server);
    stack.indexing.index_entity("e1").await.unwrap();

    let response = stack
        .query
        .semantic_search("What does Acme do?", None, Some(5))
        .await
        .unwrap();
    assert!(response.hits.len() <= 5);
    for pair in response.hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}
