//! Mood-to-theme keyword extraction.
//!
//! Sends the user's mood description to a [`CompletionProvider`] together
//! with a fixed instruction and parses the comma-separated keyword list it
//! returns. Every provider failure degrades to an empty keyword list; the
//! matcher then falls back to a random verse.

use std::sync::Arc;
use std::time::Duration;

use crate::llms::{CompletionError, CompletionProvider, CompletionRequest};

/// Instruction sent as the system message on every extraction.
pub const THEME_SYSTEM_PROMPT: &str = "You are a spiritual guide. A user will describe their mood. \
Your task is to respond with a single, short, comma-separated list of 3-5 keywords \
that represent the spiritual theme or topic that would be most comforting, encouraging, \
or relevant to the user's described mood. Respond with the keywords only, no other commentary. \
Example: 'I feel sad but hopeful' -> 'hope, perseverance, comfort, strength, future'";

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 50;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Split a completion into keywords.
///
/// Lower-cases, splits on commas, trims each segment and drops empty ones.
/// Order is preserved and duplicates are kept.
pub fn parse_keywords(completion: &str) -> Vec<String> {
    completion
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// Turns free-text mood descriptions into thematic keywords.
#[derive(Debug, Clone)]
pub struct ThemeExtractor {
    provider: Arc<dyn CompletionProvider>,
    temperature: f64,
    max_tokens: u32,
    timeout: Duration,
}

impl ThemeExtractor {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Extract keywords for `mood_text`; empty on any provider failure.
    pub async fn extract(&self, mood_text: &str) -> Vec<String> {
        let request = CompletionRequest::new(THEME_SYSTEM_PROMPT, mood_text)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let completion = tokio::time::timeout(self.timeout, self.provider.complete(request))
            .await
            .unwrap_or(Err(CompletionError::Timeout(self.timeout)));

        let completion = match completion {
            Ok(text) => text,
            Err(e) => {
                log::warn!("LLM call failed ({}): {}", self.provider.provider(), e);
                return Vec::new();
            }
        };

        let keywords = parse_keywords(completion.trim());
        log::debug!("Extracted themes {:?} from mood description", keywords);
        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llms::test_support::ScriptedCompletion;

    #[test]
    fn test_parse_keywords_normalizes() {
        assert_eq!(
            parse_keywords("hope, Comfort,  strength ,"),
            vec!["hope", "comfort", "strength"]
        );
    }

    #[test]
    fn test_parse_keywords_keeps_order_and_duplicates() {
        assert_eq!(
            parse_keywords("Peace,,peace , REST"),
            vec!["peace", "peace", "rest"]
        );
    }

    #[test]
    fn test_parse_keywords_unstructured_reply() {
        assert_eq!(
            parse_keywords("Sure! Here are some keywords"),
            vec!["sure! here are some keywords"]
        );
        assert!(parse_keywords(" , ,, ").is_empty());
        assert!(parse_keywords("").is_empty());
    }

    #[tokio::test]
    async fn test_extract_sends_instruction_and_mood() {
        let fake = ScriptedCompletion::reply("Fear, Courage, presence\n");
        let extractor = ThemeExtractor::new(Arc::new(fake.clone()));

        let keywords = extractor.extract("I am scared of tomorrow").await;
        assert_eq!(keywords, vec!["fear", "courage", "presence"]);

        let request = fake.last_request().unwrap();
        assert_eq!(request.system, THEME_SYSTEM_PROMPT);
        assert_eq!(request.user, "I am scared of tomorrow");
        assert_eq!(request.temperature, Some(DEFAULT_TEMPERATURE));
        assert_eq!(request.max_tokens, Some(DEFAULT_MAX_TOKENS));
    }

    #[tokio::test]
    async fn test_extract_provider_error_is_empty() {
        let fake = ScriptedCompletion::failing();
        let extractor = ThemeExtractor::new(Arc::new(fake.clone()));
        assert!(extractor.extract("lonely").await.is_empty());
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn test_extract_timeout_is_empty() {
        let fake = ScriptedCompletion::hanging(Duration::from_secs(5));
        let extractor =
            ThemeExtractor::new(Arc::new(fake.clone())).with_timeout(Duration::from_millis(20));

        let started = std::time::Instant::now();
        assert!(extractor.extract("restless").await.is_empty());
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(fake.calls(), 1);
    }
}
