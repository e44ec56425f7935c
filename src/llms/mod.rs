//! Language-model access.
//!
//! - [`base_llm`] - The [`CompletionProvider`] trait and its error type
//! - [`providers`] - Native provider implementations (OpenAI)

pub mod base_llm;
pub mod providers;

#[cfg(test)]
pub mod test_support;

pub use base_llm::{CompletionError, CompletionProvider, CompletionRequest};
pub use providers::OpenAICompletion;
