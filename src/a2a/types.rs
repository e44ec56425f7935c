//! JSON-RPC envelope types for the A2A `message/send` exchange.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::a2a::errors::A2AError;

/// JSON-RPC protocol version emitted on every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// The only supported method.
pub const METHOD_MESSAGE_SEND: &str = "message/send";

/// Fixed message id on agent replies.
pub const AGENT_MESSAGE_ID: &str = "agent_response_id";

/// A message part. Only `text` parts carry content the agent reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Part discriminator; newer clients send it as `kind`.
    #[serde(rename = "type", alias = "kind")]
    pub part_type: String,
    /// Text content, present on `text` parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            part_type: "text".to_string(),
            text: Some(text.into()),
        }
    }

    pub fn is_text(&self) -> bool {
        self.part_type == "text"
    }
}

/// An inbound user message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Message {
    /// Text of the first text-typed part, if any.
    ///
    /// Later text parts are ignored even when the first one is empty.
    pub fn first_text(&self) -> Option<&str> {
        self.parts
            .iter()
            .find(|p| p.is_text())
            .and_then(|p| p.text.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageSendParams {
    #[serde(default)]
    pub message: Message,
}

/// Inbound JSON-RPC request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default = "default_jsonrpc")]
    pub jsonrpc: String,
    pub method: String,
    /// Caller-chosen correlation id, echoed verbatim.
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub params: Option<MessageSendParams>,
}

fn default_jsonrpc() -> String {
    JSONRPC_VERSION.to_string()
}

impl JsonRpcRequest {
    /// Build a `message/send` request carrying a single text part.
    pub fn message_send(id: Value, text: impl Into<String>) -> Self {
        Self {
            jsonrpc: default_jsonrpc(),
            method: METHOD_MESSAGE_SEND.to_string(),
            id,
            params: Some(MessageSendParams {
                message: Message {
                    role: "user".to_string(),
                    parts: vec![Part::text(text)],
                },
            }),
        }
    }
}

/// Agent reply carried in a success response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub role: String,
    pub kind: String,
    pub message_id: String,
    pub parts: Vec<Part>,
}

impl AgentMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: "agent".to_string(),
            kind: "message".to_string(),
            message_id: AGENT_MESSAGE_ID.to_string(),
            parts: vec![Part::text(text)],
        }
    }

    /// Text of the first text part.
    pub fn first_text(&self) -> Option<&str> {
        self.parts
            .iter()
            .find(|p| p.is_text())
            .and_then(|p| p.text.as_deref())
    }
}

/// Outbound JSON-RPC response; exactly one of `result` / `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<AgentMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<A2AError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: AgentMessage) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: A2AError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
