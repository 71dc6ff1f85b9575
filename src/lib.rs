//! Sibyl - Entity Semantic Retrieval Core
//!
//! Sibyl turns heterogeneous entity content (structured entity records,
//! generated canonical copy, and scraped source documents) into a
//! searchable semantic index and answers free-text queries against it with
//! ranked, cited evidence.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): document/bundle models, error taxonomy,
//!   and port traits
//! - **Adapters Layer** (`adapters`): embedding providers, vector backends,
//!   and the upstream content source client
//! - **Service Layer** (`services`): the indexing pipeline and the
//!   query/answer engine
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging,
//!   and stack wiring
//!
//! # Example
//!
//! ```ignore
//! use sibyl::infrastructure::build_stack_from_env;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let stack = build_stack_from_env()?;
//!     let outcome = stack.indexing.index_entity("e1").await?;
//!     let answer = stack.query.answer("What does Acme do?", Some("e1"), None).await?;
//!     println!("{} ({} docs indexed)", answer.answer, outcome.indexed_count);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{RagError, RagResult};
pub use domain::models::{
    Config, EntityBundle, SourceType, VectorDoc, VectorHit,
};
pub use domain::ports::{ContentSource, EmbeddingProvider, SearchOptions, VectorBackend};
pub use infrastructure::{build_stack, build_stack_from_env, ConfigLoader, RagStack};
pub use services::{
    AnswerResponse, Citation, IndexOutcome, IndexingService, QueryService,
    SemanticSearchResponse,
};
