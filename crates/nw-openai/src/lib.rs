//! OpenAI integration for NotesWise
//!
//! This crate provides the OpenAI implementation of the `LLMProvider` and
//! `EmbeddingProvider` traits. Any server speaking the same REST dialect can
//! be used by pointing `OPENAI_API_URL` at it.

mod client;
mod config;


pub use client::OpenAIClient;
pub use config::{OpenAIConfig, DEFAULT_API_URL, DEFAULT_CHAT_MODEL, DEFAULT_EMBED_MODEL};

// Re-export core types for convenience
pub use nw_core::{
    EmbeddingProvider, Error, GenerationConfig, GenerationResult, LLMProvider, Result,
};
