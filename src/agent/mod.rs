//! The verse agent: JSON-RPC request handling.
//!
//! A request moves through validation, theme extraction, verse matching and
//! reply formatting. Only an unsupported method becomes a JSON-RPC error;
//! every other outcome, including a degraded corpus, is a normal agent
//! message.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::a2a::errors::{A2AError, A2AErrorCode};
use crate::a2a::types::{AgentMessage, JsonRpcRequest, JsonRpcResponse, METHOD_MESSAGE_SEND};
use crate::corpus::{Corpus, VerseRecord};
use crate::matcher;
use crate::themes::ThemeExtractor;

/// Reply when the message carries no text.
pub const PROMPT_FOR_MOOD: &str =
    "Please describe your mood so I can find a relevant Bible verse for you.";

/// Reply when no verse can be produced at all.
pub const NO_VERSE_APOLOGY: &str =
    "I apologize, I could not find a relevant verse at this time. Please try again later.";

/// Success reply text.
pub fn format_verse_reply(mood: &str, verse: &VerseRecord) -> String {
    format!(
        "Based on your mood ('{}'), here is a verse for you:\n\n{} ({})",
        mood, verse.text, verse.reference
    )
}

/// Recommends verses for mood descriptions and answers `message/send`.
#[derive(Debug)]
pub struct VerseAgent {
    corpus: Arc<Corpus>,
    extractor: ThemeExtractor,
    rng: Mutex<StdRng>,
}

impl VerseAgent {
    pub fn new(corpus: Arc<Corpus>, extractor: ThemeExtractor) -> Self {
        Self::with_rng(corpus, extractor, StdRng::from_entropy())
    }

    /// Use a specific random source for verse selection.
    pub fn with_rng(corpus: Arc<Corpus>, extractor: ThemeExtractor, rng: StdRng) -> Self {
        Self {
            corpus,
            extractor,
            rng: Mutex::new(rng),
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Find a verse for `mood_text`.
    ///
    /// `None` means the corpus is empty; the completion capability is not
    /// called in that case.
    pub async fn recommend(&self, mood_text: &str) -> Option<VerseRecord> {
        if self.corpus.is_empty() {
            log::warn!("Verse corpus is empty; cannot recommend a verse");
            return None;
        }

        let keywords = self.extractor.extract(mood_text).await;

        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        matcher::select(&keywords, &self.corpus, &mut *rng).cloned()
    }

    /// Handle one JSON-RPC request.
    pub async fn handle(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let JsonRpcRequest {
            method, id, params, ..
        } = request;

        if method != METHOD_MESSAGE_SEND {
            log::debug!("Rejecting unsupported method {:?}", method);
            return JsonRpcResponse::error(id, A2AError::method_not_found(&method));
        }

        let mood = params
            .as_ref()
            .and_then(|p| p.message.first_text())
            .unwrap_or_default();

        let reply = self.reply_for(mood).await;
        JsonRpcResponse::success(id, AgentMessage::text(reply))
    }

    async fn reply_for(&self, mood: &str) -> String {
        if mood.is_empty() {
            return PROMPT_FOR_MOOD.to_string();
        }

        match self.recommend(mood).await {
            Some(verse) => format_verse_reply(mood, &verse),
            None => NO_VERSE_APOLOGY.to_string(),
        }
    }

    /// Handle a raw JSON body, mapping parse and shape failures to
    /// JSON-RPC errors.
    pub async fn handle_json(&self, body: &[u8]) -> JsonRpcResponse {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("Unparseable JSON-RPC body: {}", e);
                return JsonRpcResponse::error(
                    Value::Null,
                    A2AError::from_code(A2AErrorCode::JsonParseError),
                );
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);

        // The method gates everything else; params are only read for `message/send`.
        if let Some(method) = value.get("method").and_then(Value::as_str) {
            if method != METHOD_MESSAGE_SEND {
                log::debug!("Rejecting unsupported method {:?}", method);
                return JsonRpcResponse::error(id, A2AError::method_not_found(method));
            }
        }

        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => JsonRpcResponse::error(
                id,
                A2AError::with_data(
                    A2AErrorCode::InvalidRequest,
                    "Invalid Request",
                    Value::String(e.to_string()),
                ),
            ),
        }
    }
}
