//! A2A (Agent-to-Agent) protocol surface.
//!
//! Envelope types for the JSON-RPC `message/send` exchange, JSON-RPC error
//! codes, and the agent card served for capability discovery.

pub mod card;
pub mod errors;
pub mod types;

pub use card::{build_agent_card, AgentCard};
pub use errors::{A2AError, A2AErrorCode};
pub use types::{AgentMessage, JsonRpcRequest, JsonRpcResponse, Message, Part};
