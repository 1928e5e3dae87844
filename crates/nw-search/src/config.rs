//! SerpAPI configuration

use nw_core::config::{env_or, env_parse, env_required};
use nw_core::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://serpapi.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpApiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Search engine requested from SerpAPI
    pub engine: String,
    pub timeout_secs: u64,
}

impl SerpApiConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_key: env_required("SERPAPI_API_KEY")?,
            base_url: env_or("SERPAPI_URL", DEFAULT_BASE_URL),
            engine: env_or("SERPAPI_ENGINE", "google"),
            timeout_secs: env_parse("SERPAPI_TIMEOUT_SECS", 60)?,
        })
    }

    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            engine: "google".to_string(),
            timeout_secs: 60,
        }
    }
}
