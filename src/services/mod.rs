//! Service layer: the operations exposed to the surrounding system.

pub mod indexing;
pub mod query;

pub use indexing::{IndexOutcome, IndexingService, MAX_DOC_TEXT_CHARS};
pub use query::{
    AnswerResponse, Citation, QueryService, SemanticSearchResponse, NO_MATERIAL_ANSWER,
};
