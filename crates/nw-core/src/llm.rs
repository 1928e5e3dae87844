//! LLM provider trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Configuration for a single text generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub stop_sequences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: Some(512),
            temperature: Some(0.7),
            stop_sequences: Vec::new(),
        }
    }
}

/// Result of a text generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub model_id: String,
    pub tokens_used: Option<u32>,
}

/// Trait for LLM providers (e.g., OpenAI or any compatible endpoint).
///
/// Implementations issue exactly one request per call and never retry;
/// failures are reported as [`crate::Error::GenerationService`].
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate text with custom configuration
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult>;

    /// Generate text using the LLM with default configuration
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        self.generate_with_config(prompt, &GenerationConfig::default())
            .await
    }

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
