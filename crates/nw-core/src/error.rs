//! Error types for NotesWise

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the question answering pipeline.
///
/// Nothing in the pipeline retries; every variant propagates to the caller,
/// which is expected to abandon the current interaction and report it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load document {path}: {reason}")]
    DocumentLoad { path: String, reason: String },

    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    #[error("Generation service error: {0}")]
    GenerationService(String),

    #[error("Search service error: {0}")]
    SearchService(String),

    #[error("The index contains no document units; load at least one document first")]
    EmptyIndex,

    #[error("Unknown tool `{name}`, expected one of [{available}]")]
    UnknownTool { name: String, available: String },

    #[error("Agent stopped after {iterations} iterations without a final answer")]
    AgentExhausted { iterations: usize },

    #[error("Could not parse LLM output: `{0}`")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::DocumentLoad`] about `path`.
    pub fn document_load(path: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        Error::DocumentLoad {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
