//! Deterministic `CompletionService` stand-in shared by unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{CompletionRequest, CompletionService, LlmError};

enum Reply {
    Text(Option<String>),
    Fail(fn() -> LlmError),
}

/// Records every request it receives and answers with a canned reply.
pub struct StubCompletion {
    reply: Reply,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubCompletion {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Reply::Text(Some(text.to_string())))
    }

    /// Upstream answered but the message had no content.
    pub fn empty() -> Self {
        Self::with_reply(Reply::Text(None))
    }

    pub fn failing(make_error: fn() -> LlmError) -> Self {
        Self::with_reply(Reply::Fail(make_error))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for StubCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(make_error) => Err(make_error()),
        }
    }
}
