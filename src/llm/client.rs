use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Errors from the text-generation collaborator. All of them are local to
/// one meeting or one speech; the batch never aborts on these.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to text-generation API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("text-generation API returned {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("response contained no text content")]
    EmptyResponse,
}

/// Which model a request should go to. Extraction runs once per meeting on
/// the primary model; summarization runs once per speech on the fast one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Primary,
    Fast,
}

/// The text-generation collaborator seam. The production implementation is
/// [`AnthropicClient`]; tests substitute fakes.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    async fn generate(
        &self,
        tier: ModelTier,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError>;
}

/// Configuration for the Anthropic API client
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key (from ANTHROPIC_API_KEY env var)
    pub api_key: String,
    /// Model for transcript segmentation
    pub model: String,
    /// Cheaper model for per-speech summaries
    pub fast_model: String,
    /// Temperature (0 for reproducible extraction)
    pub temperature: f64,
    /// Minimum delay between consecutive API calls
    pub min_interval: Duration,
    /// Retries on HTTP 429 only; other failures are not retried
    pub max_rate_limit_retries: u32,
}

impl AnthropicConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY environment variable not set")?;
        let model = std::env::var("ANTHROPIC_MODEL")
            .unwrap_or_else(|_| "claude-3-5-sonnet-20241022".to_string());
        let fast_model = std::env::var("ANTHROPIC_FAST_MODEL")
            .unwrap_or_else(|_| "claude-3-5-haiku-20241022".to_string());

        Ok(Self {
            api_key,
            model,
            fast_model,
            temperature: 0.0,
            min_interval: Duration::from_millis(500),
            max_rate_limit_retries: 3,
        })
    }
}

/// Anthropic API client with inter-call pacing and 429 backoff.
pub struct AnthropicClient {
    client: Client,
    config: AnthropicConfig,
    last_call: Mutex<Option<Instant>>,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            last_call: Mutex::new(None),
        }
    }

    /// Enforce the minimum gap between consecutive calls.
    async fn pace(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.config.min_interval {
                tokio::time::sleep(self.config.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl TextGenerator for AnthropicClient {
    async fn generate(
        &self,
        tier: ModelTier,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let model = match tier {
            ModelTier::Primary => &self.config.model,
            ModelTier::Fast => &self.config.fast_model,
        };

        let request = AnthropicRequest {
            model: model.clone(),
            max_tokens,
            temperature: Some(self.config.temperature),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let mut attempt = 0;
        let mut backoff = Duration::from_secs(2);

        loop {
            self.pace().await;

            let response = self
                .client
                .post(API_URL)
                .header("x-api-key", &self.config.api_key)
                .header("anthropic-version", API_VERSION)
                .header("content-type", "application/json")
                .json(&request)
                .send()
                .await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS
                && attempt < self.config.max_rate_limit_retries
            {
                attempt += 1;
                warn!(
                    "rate limited, retry {} of {} after {:?}",
                    attempt, self.config.max_rate_limit_retries, backoff
                );
                tokio::time::sleep(backoff).await;
                backoff = backoff.saturating_mul(2);
                continue;
            }

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api { status, body });
            }

            let response: AnthropicResponse = response.json().await?;

            return response
                .content
                .into_iter()
                .find(|block| block.content_type == "text")
                .map(|block| block.text)
                .ok_or(LlmError::EmptyResponse);
        }
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_extraction_shape() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "{\"speeches\": []}"}
            ]
        }"#;
        let response: AnthropicResponse = serde_json::from_str(json).unwrap();
        let text = response
            .content
            .into_iter()
            .find(|b| b.content_type == "text")
            .map(|b| b.text);
        assert_eq!(text.as_deref(), Some("{\"speeches\": []}"));
    }

    #[test]
    fn test_response_without_text_block() {
        let json = r#"{"content": [{"type": "tool_use"}]}"#;
        let response: AnthropicResponse = serde_json::from_str(json).unwrap();
        assert!(
            response
                .content
                .into_iter()
                .find(|b| b.content_type == "text")
                .is_none()
        );
    }
}
