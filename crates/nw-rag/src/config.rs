//! Indexing and retrieval configuration

use nw_core::config::env_parse;
use nw_core::Result;
use serde::{Deserialize, Serialize};

/// Configuration for document indexing and retrieval QA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagConfig {
    /// Maximum characters per document unit
    pub chunk_size: usize,
    /// Characters carried over between consecutive units of a page
    pub chunk_overlap: usize,
    /// Number of units retrieved per query
    pub top_k: usize,
    /// Units per embedding request
    pub embed_batch_size: usize,
    /// Sampling temperature for the answer generation call
    pub qa_temperature: f32,
    pub qa_max_tokens: u32,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 2,
            embed_batch_size: 64,
            qa_temperature: 0.7,
            qa_max_tokens: 512,
        }
    }
}

impl RagConfig {
    /// Create configuration from environment variables, defaulting every field
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            chunk_size: env_parse("NOTES_CHUNK_SIZE", defaults.chunk_size)?,
            chunk_overlap: env_parse("NOTES_CHUNK_OVERLAP", defaults.chunk_overlap)?,
            top_k: env_parse("NOTES_TOP_K", defaults.top_k)?,
            embed_batch_size: env_parse("NOTES_EMBED_BATCH", defaults.embed_batch_size)?,
            qa_temperature: env_parse("NOTES_QA_TEMPERATURE", defaults.qa_temperature)?,
            qa_max_tokens: env_parse("NOTES_QA_MAX_TOKENS", defaults.qa_max_tokens)?,
        })
    }
}
