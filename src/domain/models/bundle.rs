//! Entity bundle wire models.
//!
//! The upstream content source serves the combined payload of an entity's
//! metadata, generated canonical copy, and raw source documents. The entity
//! record itself stays schemaless here: the indexing pipeline only
//! serializes it back to text, so its upstream schema is not this crate's
//! contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Combined indexing payload for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityBundle {
    /// The structured entity record, passed through untyped.
    pub entity: serde_json::Value,
    /// Generated canonical copy, when it has been produced.
    #[serde(default)]
    pub canonical_content: Option<CanonicalContent>,
    /// Raw ingested source documents.
    #[serde(default)]
    pub source_documents: Vec<SourceDocument>,
}

/// Generated canonical copy for an entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalContent {
    #[serde(default)]
    pub entity_id: String,
    /// Short summary.
    #[serde(default)]
    pub about_short: String,
    /// Long summary.
    #[serde(default)]
    pub about_long: String,
    #[serde(default)]
    pub faq: Vec<CanonicalFaqItem>,
}

/// One FAQ entry of the canonical copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanonicalFaqItem {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// One raw ingested document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Declared media type, e.g. `text/html`.
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub ingested_at: Option<DateTime<Utc>>,
}
