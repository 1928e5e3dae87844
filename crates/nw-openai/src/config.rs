//! OpenAI configuration

use nw_core::config::{env_or, env_parse, env_required};
use nw_core::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.openai.com";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";

/// Configuration for the OpenAI client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub api_url: String,
    pub chat_model: String,
    pub embed_model: String,
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_key: env_required("OPENAI_API_KEY")?,
            api_url: env_or("OPENAI_API_URL", DEFAULT_API_URL),
            chat_model: env_or("OPENAI_CHAT_MODEL", DEFAULT_CHAT_MODEL),
            embed_model: env_or("OPENAI_EMBED_MODEL", DEFAULT_EMBED_MODEL),
            timeout_secs: env_parse("OPENAI_TIMEOUT_SECS", 60)?,
        })
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            timeout_secs: 60,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}
