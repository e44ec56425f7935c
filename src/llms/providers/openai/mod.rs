//! OpenAI Chat Completions provider.
//!
//! Talks to the Chat Completions API directly via `reqwest`: bearer auth,
//! optional organization header, request timeout, and a bounded retry loop
//! with exponential backoff for transport errors, 429 and 5xx responses.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llms::base_llm::{CompletionError, CompletionProvider, CompletionRequest};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Delay before the first retry; doubled after each attempt.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// OpenAI chat completion provider.
///
/// # Example
///
/// ```ignore
/// let provider = OpenAICompletion::new("gpt-4.1-mini", None, None);
/// let text = provider
///     .complete(CompletionRequest::new("You are a spiritual guide.", "I feel lost"))
///     .await?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAICompletion {
    /// Model name (e.g., "gpt-4.1-mini").
    pub model: String,
    /// API key. Requests fail with [`CompletionError::MissingApiKey`] without one.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Custom base URL.
    pub base_url: Option<String>,
    /// Organization ID for multi-tenant access.
    pub organization: Option<String>,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
    /// Maximum number of retries.
    pub max_retries: u32,
    /// Initial retry delay.
    pub retry_backoff: Duration,
}

impl OpenAICompletion {
    /// Create a new provider.
    ///
    /// * `model` - OpenAI model name.
    /// * `api_key` - API key; the environment is not consulted.
    /// * `base_url` - Optional custom base URL.
    pub fn new(model: impl Into<String>, api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            model: model.into(),
            api_key,
            base_url,
            organization: None,
            timeout: None,
            max_retries: 2,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// Build the request body for the Chat Completions API.
    pub fn build_request_body(&self, request: &CompletionRequest) -> Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.user},
            ],
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }

    /// Extract the first choice's text from a Chat Completions response.
    pub fn parse_completions_response(response: &Value) -> Result<String, CompletionError> {
        let message = response
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .ok_or_else(|| CompletionError::Malformed("No message in OpenAI response".into()))?;

        if let Some(usage) = response.get("usage") {
            log::debug!(
                "OpenAI token usage: prompt={}, completion={}, total={}",
                usage.get("prompt_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
                usage.get("completion_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
                usage.get("total_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
            );
        }

        match message.get("content").and_then(|c| c.as_str()) {
            Some(content) if !content.trim().is_empty() => Ok(content.to_string()),
            _ => Err(CompletionError::EmptyResponse),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAICompletion {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        log::debug!("OpenAICompletion.complete: model={}", self.model);

        let api_key = self.api_key.as_ref().ok_or(CompletionError::MissingApiKey)?;
        let body = self.build_request_body(&request);
        let endpoint = format!("{}/chat/completions", self.api_base_url());

        let client = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        let mut last_error: Option<CompletionError> = None;
        let mut retry_delay = self.retry_backoff;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                log::warn!("OpenAI API retry attempt {} after {:?}", attempt, retry_delay);
                tokio::time::sleep(retry_delay).await;
                retry_delay = retry_delay.saturating_mul(2);
            }

            let mut http_request = client
                .post(&endpoint)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {}", api_key));

            if let Some(ref org) = self.organization {
                http_request = http_request.header("OpenAI-Organization", org);
            }

            let response = match http_request.json(&body).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = Some(CompletionError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            let response_text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    last_error = Some(CompletionError::Http(e));
                    continue;
                }
            };

            if !status.is_success() {
                let err = CompletionError::Status {
                    status: status.as_u16(),
                    body: response_text.chars().take(500).collect(),
                };
                if err.is_retryable() {
                    last_error = Some(err);
                    continue;
                }
                return Err(err);
            }

            let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
                CompletionError::Malformed(format!(
                    "{} - Body: {}",
                    e,
                    response_text.chars().take(500).collect::<String>()
                ))
            })?;

            return Self::parse_completions_response(&response_json);
        }

        Err(last_error.unwrap_or_else(|| {
            CompletionError::Malformed("OpenAI API call failed after all retries".into())
        }))
    }
}
