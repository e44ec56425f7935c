//! Text-completion capability consumed by the theme extractor.
//!
//! Providers implement [`CompletionProvider`]; the rest of the crate only
//! ever sees this narrow interface, so tests can swap in a scripted fake.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single system + user completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Fixed instruction sent as the system message.
    pub system: String,
    /// The user's raw input.
    pub user: String,
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Upper bound on generated tokens.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Errors raised by a completion provider.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No API key was configured.
    #[error("API key not set. Set OPENAI_API_KEY environment variable.")]
    MissingApiKey,

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the provider.
    #[error("Provider API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The response could not be interpreted.
    #[error("Malformed provider response: {0}")]
    Malformed(String),

    /// The provider answered without any text.
    #[error("Provider returned an empty completion")]
    EmptyResponse,

    /// The call did not finish within the caller's deadline.
    #[error("Completion timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl CompletionError {
    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Opaque text-completion capability.
#[async_trait]
pub trait CompletionProvider: Send + Sync + fmt::Debug {
    /// Model identifier used for requests.
    fn model(&self) -> &str;

    /// Provider name, for logging.
    fn provider(&self) -> &str {
        "openai"
    }

    /// Produce a single completion for `request`.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = CompletionRequest::new("sys", "user text")
            .with_temperature(0.7)
            .with_max_tokens(50);
        assert_eq!(req.system, "sys");
        assert_eq!(req.user, "user text");
        assert_eq!(req.temperature, Some(0.7));
        assert_eq!(req.max_tokens, Some(50));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(CompletionError::Status { status: 429, body: String::new() }.is_retryable());
        assert!(CompletionError::Status { status: 503, body: String::new() }.is_retryable());
        assert!(!CompletionError::Status { status: 401, body: String::new() }.is_retryable());
        assert!(!CompletionError::MissingApiKey.is_retryable());
        assert!(!CompletionError::EmptyResponse.is_retryable());
    }

    #[test]
    fn test_timeout_error() {
        let err = CompletionError::Timeout(std::time::Duration::from_millis(20));
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Completion timed out after 20ms");
    }
}
