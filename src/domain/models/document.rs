//! Indexable document and search hit models.
//!
//! A [`VectorDoc`] is the unit of content flowing from the indexing
//! pipeline into a vector backend; a [`VectorHit`] is one scored result
//! coming back out of a search.

use serde::{Deserialize, Serialize};

/// Provenance of an indexed document.
///
/// Preserved end-to-end where the backend supports payload storage, but
/// never used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// A scraped page or other raw ingested document.
    SourceDocument,
    /// Generated canonical copy (summaries, FAQ) or the entity record.
    CanonicalContent,
}

/// One indexable unit of text.
///
/// `id` uniquely identifies a logical document within a collection:
/// upserting the same `id` twice replaces the stored embedding and payload,
/// it never duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorDoc {
    /// Globally unique document id within the logical collection.
    pub id: String,
    /// Owning entity, when the document participates in scoped search.
    /// Documents without one are excluded from any entity-scoped search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Raw content; embedded as-is and returned verbatim in hits.
    pub text: String,
    /// Provenance tag.
    pub source_type: SourceType,
    /// Origin URL for scraped source documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A scored search result.
///
/// Hits for a single search are ordered by non-increasing `score`;
/// equal scores are ordered by `id` so identical inputs always produce
/// identical output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorHit {
    /// Logical document id.
    pub id: String,
    /// Similarity score, higher is better.
    pub score: f32,
    /// The stored text, verbatim.
    pub text: String,
    /// Owning entity, if the document carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Origin URL, if the document carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
