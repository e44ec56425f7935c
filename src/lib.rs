//! # Verse Agent
//!
//! An A2A agent that recommends a Bible verse matching the mood a user
//! describes.
//!
//! A `message/send` request flows through the [`agent::VerseAgent`]: the
//! mood text is turned into a handful of thematic keywords by a language
//! model ([`themes`]), the keywords are matched against the in-memory verse
//! [`corpus`] ([`matcher`]), and the chosen verse is returned in a JSON-RPC
//! reply. Model failures and unmatched keywords fall back to a random verse.

pub mod a2a;
pub mod agent;
pub mod config;
pub mod corpus;
pub mod llms;
pub mod matcher;
pub mod server;
pub mod themes;

pub use agent::VerseAgent;
pub use config::AgentConfig;
pub use corpus::{Corpus, CorpusError, VerseRecord};
pub use llms::{CompletionError, CompletionProvider, OpenAICompletion};
pub use themes::ThemeExtractor;

/// Crate version reported on the health route.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
