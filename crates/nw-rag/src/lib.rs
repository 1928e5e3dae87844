//! Document indexing and retrieval QA for NotesWise
//!
//! This crate loads lecture notes (PDF, plain text, Markdown), splits them into
//! document units, embeds them into an in-memory vector index and answers
//! questions from the closest units.

pub mod config;
mod embedder;
mod indexer;
pub mod loader;
mod qa;
pub mod splitter;
mod vector_store;


pub use config::RagConfig;
pub use embedder::{HashingEmbedder, DEFAULT_DIMENSION};
pub use indexer::DocumentIndexer;
pub use qa::{build_context, build_prompt, QAResponse, RetrievalQA};
pub use splitter::TextSplitter;
pub use vector_store::{cosine_similarity, ScoredUnit, VectorIndex};

// Re-export core types for convenience
pub use nw_core::{DocumentUnit, EmbeddingProvider, Error, LLMProvider, Result};
