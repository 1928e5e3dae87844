//! SerpAPI client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use url::Url;

use nw_core::{Error, Result, SearchProvider};

use crate::config::SerpApiConfig;

pub const NO_RESULT: &str = "No good search result found";

/// Web search through SerpAPI's JSON endpoint
#[derive(Debug)]
pub struct SerpApiClient {
    config: SerpApiConfig,
    client: Client,
    endpoint: Url,
}

impl SerpApiClient {
    pub fn new(config: SerpApiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            Error::Configuration(format!("invalid SERPAPI_URL `{}`: {}", config.base_url, e))
        })?;
        let endpoint = base
            .join("search")
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self {
            config,
            client,
            endpoint,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(SerpApiConfig::from_env()?)
    }

    fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("engine", &self.config.engine)
            .append_pair("q", query)
            .append_pair("api_key", &self.config.api_key);
        url
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str) -> Result<String> {
        let started = Instant::now();
        debug!(query, engine = %self.config.engine, "web search");

        // The request URL carries the API key, so errors are reported without it
        let response = self
            .client
            .get(self.request_url(query))
            .send()
            .await
            .map_err(|e| Error::SearchService(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| {
                Error::SearchService(format!("failed to decode response: {}", e.without_url()))
            })?;

        if !status.is_success() {
            error!(%status, "SerpAPI returned non-success status");
            let detail = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("no error message");
            return Err(Error::SearchService(format!("status {}: {}", status, detail)));
        }

        let answer = extract_answer(&body)?;
        info!(latency_ms = started.elapsed().as_millis() as u64, "web search completed");
        Ok(answer)
    }
}

/// Pick the most direct answer out of a SerpAPI result document.
///
/// Answer boxes win over sports results, which win over the knowledge graph,
/// which wins over the first organic snippet.
pub fn extract_answer(body: &Value) -> Result<String> {
    if let Some(err) = body.get("error") {
        let message = err.as_str().map(str::to_string).unwrap_or_else(|| err.to_string());
        return Err(Error::SearchService(message));
    }

    let answer_box = body.get("answer_box");
    let candidates = [
        answer_box.and_then(|b| b.get("answer")),
        answer_box.and_then(|b| b.get("snippet")),
        answer_box
            .and_then(|b| b.get("snippet_highlighted_words"))
            .and_then(|w| w.get(0)),
        body.get("sports_results")
            .and_then(|s| s.get("game_spotlight")),
        body.get("knowledge_graph")
            .and_then(|k| k.get("description")),
        body.get("organic_results")
            .and_then(|r| r.get(0))
            .and_then(|r| r.get("snippet")),
    ];

    let found = candidates.into_iter().flatten().find(|v| !v.is_null());
    Ok(match found {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => NO_RESULT.to_string(),
    })
}
