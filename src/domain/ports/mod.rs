//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that adapters implement:
//! - `EmbeddingProvider`: text to fixed-dimension vectors
//! - `VectorBackend`: persistence and similarity search over documents
//! - `ContentSource`: upstream entity bundle fetches
//!
//! These traits define the contracts that keep the services independent
//! of the concrete provider, store, and upstream implementations.

pub mod content_source;
pub mod embedding;
pub mod vector_backend;

pub use content_source::ContentSource;
pub use embedding::EmbeddingProvider;
pub use vector_backend::{SearchOptions, VectorBackend, DEFAULT_TOP_K};
