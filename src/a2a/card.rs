//! Agent card served on the discovery route.
//!
//! The card is static for the life of the process; only the base URL and
//! provider details come from configuration.

use serde::{Deserialize, Serialize};

use crate::a2a::types::Part;
use crate::config::AgentConfig;

pub const AGENT_NAME: &str = "Daily Bible Verse Agent";
pub const AGENT_VERSION: &str = "1.0.0";
pub const SKILL_ID: &str = "mood_verse_recommendation";

/// Provider information for the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProvider {
    pub organization: String,
    pub url: Option<String>,
}

/// Capability flags advertised by the agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    #[serde(default)]
    pub streaming: bool,
    #[serde(default)]
    pub push_notifications: bool,
    #[serde(default)]
    pub state_transition_history: bool,
}

/// An example exchange shown on a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillExample {
    pub input: ExampleMessage,
    pub output: ExampleMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleMessage {
    pub parts: Vec<Part>,
}

impl ExampleMessage {
    fn text(text: &str) -> Self {
        Self {
            parts: vec![Part::text(text)],
        }
    }
}

/// A skill the agent offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub input_modes: Vec<String>,
    #[serde(default)]
    pub output_modes: Vec<String>,
    #[serde(default)]
    pub examples: Vec<SkillExample>,
}

/// Capability manifest describing this agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub version: String,
    pub provider: Option<AgentProvider>,
    #[serde(default)]
    pub capabilities: AgentCapabilities,
    pub default_input_modes: Vec<String>,
    pub default_output_modes: Vec<String>,
    #[serde(default)]
    pub skills: Vec<AgentSkill>,
    #[serde(default)]
    pub supports_authenticated_extended_card: bool,
}

/// Build the card for the verse agent.
pub fn build_agent_card(config: &AgentConfig) -> AgentCard {
    let text_plain = vec!["text/plain".to_string()];

    AgentCard {
        name: AGENT_NAME.to_string(),
        description: Some(
            "Provides a personalized Bible verse based on your mood. Just tell me how you feel!"
                .to_string(),
        ),
        url: format!("{}/", config.base_url.trim_end_matches('/')),
        version: AGENT_VERSION.to_string(),
        provider: Some(AgentProvider {
            organization: config.provider_organization.clone(),
            url: config.provider_url.clone(),
        }),
        capabilities: AgentCapabilities::default(),
        default_input_modes: text_plain.clone(),
        default_output_modes: text_plain.clone(),
        skills: vec![AgentSkill {
            id: SKILL_ID.to_string(),
            name: "Mood-Based Verse".to_string(),
            description: Some(
                "Generates a relevant Bible verse after analyzing the user's mood description."
                    .to_string(),
            ),
            input_modes: text_plain.clone(),
            output_modes: text_plain,
            examples: vec![SkillExample {
                input: ExampleMessage::text("I feel anxious and need comfort."),
                output: ExampleMessage::text(
                    "Fear not, for I am with you; be not dismayed, for I am your God; \
                     I will strengthen you, I will help you, I will uphold you with my \
                     righteous right hand. (Isaiah 41:10)",
                ),
            }],
        }],
        supports_authenticated_extended_card: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_shape() {
        let config = AgentConfig {
            base_url: "https://verses.example.org/".to_string(),
            ..AgentConfig::default()
        };
        let card = serde_json::to_value(build_agent_card(&config)).unwrap();

        assert_eq!(card["name"], AGENT_NAME);
        assert_eq!(card["url"], "https://verses.example.org/");
        assert_eq!(card["version"], "1.0.0");
        assert_eq!(card["capabilities"]["streaming"], false);
        assert_eq!(card["capabilities"]["pushNotifications"], false);
        assert_eq!(card["capabilities"]["stateTransitionHistory"], false);
        assert_eq!(card["defaultInputModes"][0], "text/plain");
        assert_eq!(card["defaultOutputModes"][0], "text/plain");
        assert_eq!(card["supportsAuthenticatedExtendedCard"], false);

        let skill = &card["skills"][0];
        assert_eq!(skill["id"], SKILL_ID);
        assert_eq!(skill["inputModes"][0], "text/plain");
        assert_eq!(skill["examples"][0]["input"]["parts"][0]["type"], "text");
        assert!(skill["examples"][0]["output"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .ends_with("(Isaiah 41:10)"));
    }

    #[test]
    fn test_card_provider_from_config() {
        let config = AgentConfig {
            provider_organization: "Grace Labs".to_string(),
            provider_url: Some("https://grace.example".to_string()),
            ..AgentConfig::default()
        };
        let card = build_agent_card(&config);
        let provider = card.provider.unwrap();
        assert_eq!(provider.organization, "Grace Labs");
        assert_eq!(provider.url.as_deref(), Some("https://grace.example"));
    }
}
