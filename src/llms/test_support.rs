//! Scripted completion provider for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::base_llm::{CompletionError, CompletionProvider, CompletionRequest};

/// What the fake returns on each call.
#[derive(Debug, Clone)]
pub enum Script {
    Reply(String),
    Fail,
    Hang(Duration),
}

/// Completion provider that replays a fixed script and records its inputs.
#[derive(Debug, Clone)]
pub struct ScriptedCompletion {
    script: Script,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<CompletionRequest>>>,
}

impl ScriptedCompletion {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::new(Script::Reply(text.into()))
    }

    pub fn failing() -> Self {
        Self::new(Script::Fail)
    }

    pub fn hanging(delay: Duration) -> Self {
        Self::new(Script::Hang(delay))
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedCompletion {
    fn model(&self) -> &str {
        "scripted"
    }

    fn provider(&self) -> &str {
        "test"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);

        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail => Err(CompletionError::Status {
                status: 500,
                body: "scripted failure".into(),
            }),
            Script::Hang(delay) => {
                tokio::time::sleep(*delay).await;
                Ok("too late".into())
            }
        }
    }
}
