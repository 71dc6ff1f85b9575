//! Upstream content source port.
//!
//! The indexing pipeline pulls entity bundles from an upstream service;
//! this trait is its only view of that service.

use async_trait::async_trait;

use crate::domain::errors::RagResult;
use crate::domain::models::EntityBundle;

/// Trait for the upstream content source.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the combined indexing payload for one entity.
    ///
    /// Any upstream failure is propagated to the caller verbatim, carrying
    /// the upstream status and a response body excerpt.
    async fn fetch_entity_bundle(&self, entity_id: &str) -> RagResult<EntityBundle>;
}
