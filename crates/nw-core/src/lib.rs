//! Core traits and types for NotesWise
//!
//! This crate defines the error taxonomy, the document unit type and the
//! provider-facing traits (LLM, embeddings, search, agent tools) shared by the
//! rest of the workspace, so every external service can be replaced by a stub
//! in tests.

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod tool;

pub use document::{DocumentUnit, UnitMetadata};
pub use embedding::EmbeddingProvider;
pub use error::{Error, Result};
pub use llm::{GenerationConfig, GenerationResult, LLMProvider};
pub use tool::{SearchProvider, Tool};
