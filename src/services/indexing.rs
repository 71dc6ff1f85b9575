//! Indexing pipeline.
//!
//! Fetches an entity bundle from the upstream content source, decomposes
//! it into indexable documents, and upserts them into the active vector
//! backend in one call. Document ids are deterministic, so re-running the
//! pipeline for an entity overwrites its previous chunks instead of
//! duplicating them; re-indexing is the only refresh mechanism.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::RagResult;
use crate::domain::models::{EntityBundle, SourceType, VectorDoc};
use crate::domain::ports::{ContentSource, VectorBackend};

/// Upper bound on stored document text, in characters.
pub const MAX_DOC_TEXT_CHARS: usize = 50_000;

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap());
static STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Result of one indexing run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexOutcome {
    /// Number of documents written to the backend.
    pub indexed_count: usize,
}

/// Pipeline turning entity bundles into indexed documents.
pub struct IndexingService {
    source: Arc<dyn ContentSource>,
    backend: Arc<dyn VectorBackend>,
}

impl IndexingService {
    pub fn new(source: Arc<dyn ContentSource>, backend: Arc<dyn VectorBackend>) -> Self {
        Self { source, backend }
    }

    /// Fetch, decompose, and index one entity's bundle.
    ///
    /// Upstream failures propagate verbatim. The resulting document set is
    /// written in a single upsert, so a backend or provider failure leaves
    /// the previous index state untouched.
    pub async fn index_entity(&self, entity_id: &str) -> RagResult<IndexOutcome> {
        let bundle = self.source.fetch_entity_bundle(entity_id).await?;
        let docs = decompose_bundle(entity_id, &bundle)?;

        self.backend.upsert(&docs).await?;

        tracing::info!(
            entity_id,
            indexed_count = docs.len(),
            "indexed entity bundle"
        );
        Ok(IndexOutcome {
            indexed_count: docs.len(),
        })
    }
}

/// Decompose a bundle into the deterministic document set for an entity.
fn decompose_bundle(entity_id: &str, bundle: &EntityBundle) -> RagResult<Vec<VectorDoc>> {
    let mut docs = Vec::new();

    // The raw entity record is always indexed.
    docs.push(VectorDoc {
        id: format!("entity:{entity_id}"),
        entity_id: Some(entity_id.to_string()),
        text: serde_json::to_string(&bundle.entity)?,
        source_type: SourceType::CanonicalContent,
        url: None,
    });

    if let Some(canonical) = &bundle.canonical_content {
        if !canonical.about_short.trim().is_empty() {
            docs.push(VectorDoc {
                id: format!("canonical:about_short:{entity_id}"),
                entity_id: Some(entity_id.to_string()),
                text: canonical.about_short.trim().to_string(),
                source_type: SourceType::CanonicalContent,
                url: None,
            });
        }
        if !canonical.about_long.trim().is_empty() {
            docs.push(VectorDoc {
                id: format!("canonical:about_long:{entity_id}"),
                entity_id: Some(entity_id.to_string()),
                text: canonical.about_long.trim().to_string(),
                source_type: SourceType::CanonicalContent,
                url: None,
            });
        }
        for (index, item) in canonical.faq.iter().enumerate() {
            let question = item.question.trim();
            let answer = item.answer.trim();
            if question.is_empty() || answer.is_empty() {
                continue;
            }
            docs.push(VectorDoc {
                id: format!("canonical:faq:{entity_id}:{index}"),
                entity_id: Some(entity_id.to_string()),
                text: format!("Q: {question}\nA: {answer}"),
                source_type: SourceType::CanonicalContent,
                url: None,
            });
        }
    }

    for source_doc in &bundle.source_documents {
        let raw = source_doc.content.as_deref().unwrap_or_default();
        let is_html = source_doc
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("html"));
        let text = if is_html {
            strip_html(raw)
        } else {
            raw.trim().to_string()
        };
        if text.is_empty() {
            tracing::debug!(source_id = %source_doc.id, "skipping blank source document");
            continue;
        }

        docs.push(VectorDoc {
            id: format!("source:{}", source_doc.id),
            entity_id: Some(entity_id.to_string()),
            text: truncate_chars(&text, MAX_DOC_TEXT_CHARS),
            source_type: SourceType::SourceDocument,
            url: source_doc.url.clone(),
        });
    }

    Ok(docs)
}

/// Strip markup from an HTML document.
///
/// Removes `<script>`/`<style>` blocks and all remaining tags, then
/// collapses whitespace.
fn strip_html(html: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(html, " ");
    let without_styles = STYLE_RE.replace_all(&without_scripts, " ");
    let without_tags = TAG_RE.replace_all(&without_styles, " ");
    WHITESPACE_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Truncate to at most `max` characters, on a char boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
