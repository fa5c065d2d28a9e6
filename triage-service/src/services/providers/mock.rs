//! Mock chat model for testing.

use super::{ChatModel, GenerationParams, ProviderError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

enum Script {
    Reply(String),
    Fail,
}

/// Returns a fixed reply, or fails every call, and remembers what it was asked.
pub struct MockChatModel {
    script: Script,
    calls: AtomicUsize,
    last_user_prompt: Mutex<Option<String>>,
}

impl MockChatModel {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with_script(Script::Reply(reply.into()))
    }

    pub fn failing() -> Self {
        Self::with_script(Script::Fail)
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_user_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_user_prompt(&self) -> Option<String> {
        self.last_user_prompt
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_user_prompt.lock() {
            *last = Some(user_prompt.to_string());
        }

        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail => Err(ProviderError::ApiError(
                "Mock chat model configured to fail".to_string(),
            )),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
