//! Runtime configuration for the verse agent.
//!
//! Values come from environment variables; anything unset falls back to
//! the defaults below.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8000` |
//! | `VERSE_CORPUS_PATH` | `processed_bible_data.json` |
//! | `AGENT_BASE_URL` | `http://localhost:8000` |
//! | `AGENT_PROVIDER_ORG` | `Daily Verse` |
//! | `AGENT_PROVIDER_URL` | unset |
//! | `OPENAI_API_KEY` | unset |
//! | `OPENAI_ORGANIZATION` | unset |
//! | `OPENAI_BASE_URL` | `https://api.openai.com/v1` |
//! | `VERSE_MODEL` | `gpt-4.1-mini` |
//! | `LLM_TIMEOUT_SECS` | `15` |

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::llms::providers::openai::DEFAULT_BASE_URL;
use crate::themes::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path of the flattened corpus JSON.
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,
    /// Public URL advertised on the agent card.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_provider_organization")]
    pub provider_organization: String,
    pub provider_url: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Sent as the `OpenAI-Organization` header when set.
    pub organization: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Deadline for one theme-extraction call, in seconds.
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_corpus_path() -> String { "processed_bible_data.json".to_string() }
fn default_base_url() -> String { "http://localhost:8000".to_string() }
fn default_provider_organization() -> String { "Daily Verse".to_string() }
fn default_api_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_model() -> String { "gpt-4.1-mini".to_string() }
fn default_llm_timeout_secs() -> u64 { 15 }
fn default_temperature() -> f64 { DEFAULT_TEMPERATURE }
fn default_max_tokens() -> u32 { DEFAULT_MAX_TOKENS }

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            corpus_path: default_corpus_path(),
            base_url: default_base_url(),
            provider_organization: default_provider_organization(),
            provider_url: None,
            api_key: None,
            organization: None,
            api_base_url: default_api_base_url(),
            model: default_model(),
            llm_timeout_secs: default_llm_timeout_secs(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl AgentConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or(get("PORT"), "PORT", defaults.port),
            corpus_path: get("VERSE_CORPUS_PATH").unwrap_or(defaults.corpus_path),
            base_url: get("AGENT_BASE_URL").unwrap_or(defaults.base_url),
            provider_organization: get("AGENT_PROVIDER_ORG")
                .unwrap_or(defaults.provider_organization),
            provider_url: get("AGENT_PROVIDER_URL"),
            api_key: get("OPENAI_API_KEY"),
            organization: get("OPENAI_ORGANIZATION"),
            api_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.api_base_url),
            model: get("VERSE_MODEL").unwrap_or(defaults.model),
            llm_timeout_secs: parse_or(
                get("LLM_TIMEOUT_SECS"),
                "LLM_TIMEOUT_SECS",
                defaults.llm_timeout_secs,
            ),
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

fn parse_or<T: FromStr + Copy>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}, using default", key, value);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AgentConfig::from_lookup(lookup(&[]));
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.corpus_path, "processed_bible_data.json");
        assert_eq!(config.model, "gpt-4.1-mini");
        assert_eq!(config.llm_timeout(), Duration::from_secs(15));
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 50);
        assert!(config.api_key.is_none());
        assert!(config.organization.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AgentConfig::from_lookup(lookup(&[
            ("PORT", "9090"),
            ("VERSE_CORPUS_PATH", "/data/verses.json"),
            ("AGENT_BASE_URL", "https://verse.example"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_ORGANIZATION", "org-123"),
            ("LLM_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.organization.as_deref(), Some("org-123"));
        assert_eq!(config.port, 9090);
        assert_eq!(config.corpus_path, "/data/verses.json");
        assert_eq!(config.base_url, "https://verse.example");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm_timeout_secs, 3);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = AgentConfig::from_lookup(lookup(&[("PORT", "eighty"), ("LLM_TIMEOUT_SECS", "")]));
        assert_eq!(config.port, 8000);
        assert_eq!(config.llm_timeout_secs, 15);
    }
}
