//! OpenAI client implementation
//!
//! Non-streaming client around two endpoints derived from `api_url`:
//! - POST {api_url}/v1/chat/completions for generation
//! - POST {api_url}/v1/embeddings for embeddings
//!
//! Each call is a single request. There is no retry; failures map to
//! `Error::GenerationService` or `Error::EmbeddingService`.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use nw_core::{
    EmbeddingProvider, Error, GenerationConfig, GenerationResult, LLMProvider, Result,
};

use crate::config::OpenAIConfig;

const SNIPPET_LEN: usize = 300;

/// OpenAI client
#[derive(Debug)]
pub struct OpenAIClient {
    config: OpenAIConfig,
    client: Client,
    url_chat: String,
    url_embeddings: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(model: &'a str, prompt: &'a str, config: &'a GenerationConfig) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            stop: config.stop_sequences.iter().map(String::as_str).collect(),
        }
    }
}

impl OpenAIClient {
    /// Create a new OpenAI client from configuration
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let endpoint = config.api_url.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::Configuration(format!(
                "OPENAI_API_URL must start with http:// or https://, got `{}`",
                config.api_url
            )));
        }

        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| Error::Configuration(format!("invalid API key header: {}", e)))?;
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/v1/chat/completions", base);
        let url_embeddings = format!("{}/v1/embeddings", base);

        info!(
            chat_model = %config.chat_model,
            embed_model = %config.embed_model,
            endpoint = %base,
            timeout_secs = config.timeout_secs,
            "OpenAI client initialized"
        );

        Ok(Self {
            config,
            client,
            url_chat,
            url_embeddings,
        })
    }

    /// Create a new OpenAI client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env()?)
    }

    /// POST `body` to `url` and decode the JSON reply, reporting failures through `wrap`
    async fn post<B, T>(&self, url: &str, body: &B, wrap: fn(String) -> Error) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: for<'de> Deserialize<'de>,
    {
        let started = Instant::now();
        debug!(%url, "POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| wrap(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis() as u64,
                "OpenAI returned non-success status"
            );
            return Err(wrap(format!("{} returned {}: {}", url, status, snippet)));
        }

        let decoded = response.json::<T>().await.map_err(|e| {
            error!(error = %e, %url, "failed to decode OpenAI response");
            wrap(format!("failed to decode response from {}: {}", url, e))
        })?;

        info!(%url, latency_ms = started.elapsed().as_millis() as u64, "OpenAI request completed");
        Ok(decoded)
    }
}

#[async_trait]
impl LLMProvider for OpenAIClient {
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let body = ChatCompletionRequest::new(&self.config.chat_model, prompt, config);
        debug!(
            model = %self.config.chat_model,
            prompt_len = prompt.len(),
            stop = ?config.stop_sequences,
            "chat completion"
        );

        let out: ChatCompletionResponse = self
            .post(&self.url_chat, &body, Error::GenerationService)
            .await?;

        let text = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or_else(|| Error::GenerationService("response contained no choices".to_string()))?;

        Ok(GenerationResult {
            text,
            model_id: self.config.chat_model.clone(),
            tokens_used: out.usage.and_then(|u| u.total_tokens),
        })
    }

    fn model_id(&self) -> &str {
        &self.config.chat_model
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIClient {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let body = EmbeddingsRequest {
            model: &self.config.embed_model,
            input: texts,
        };
        debug!(model = %self.config.embed_model, inputs = texts.len(), "embeddings");

        let out: EmbeddingsResponse = self
            .post(&self.url_embeddings, &body, Error::EmbeddingService)
            .await?;

        order_embeddings(out, texts.len())
    }

    fn model_id(&self) -> &str {
        &self.config.embed_model
    }
}

/// Put vectors back in input order and check that every input got one
fn order_embeddings(response: EmbeddingsResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
    let mut items = response.data;
    if items.len() != expected {
        return Err(Error::EmbeddingService(format!(
            "expected {} embeddings, got {}",
            expected,
            items.len()
        )));
    }
    items.sort_by_key(|item| item.index);
    if let Some((position, item)) = items
        .iter()
        .enumerate()
        .find(|(position, item)| item.index != *position)
    {
        return Err(Error::EmbeddingService(format!(
            "embedding index {} found where {} was expected",
            item.index, position
        )));
    }
    Ok(items.into_iter().map(|item| item.embedding).collect())
}

/// Trim a response body for logs and error messages
fn make_snippet(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= SNIPPET_LEN {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(SNIPPET_LEN).collect();
    format!("{}...", cut)
}
