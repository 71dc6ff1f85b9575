//! Adapters for external systems.

pub mod embeddings;
pub mod upstream;
pub mod vector;

pub use embeddings::create_embedding_provider;
pub use upstream::HttpContentSource;
pub use vector::create_vector_backend;
