//! Scripted story driver.

use async_trait::async_trait;
use feuilleton_core::{GenerateRequest, GenerateResponse};
use feuilleton_error::{FeuilletonResult, GeminiError, GeminiErrorKind};
use feuilleton_interface::StoryDriver;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Reply with text
    Text(String),
    /// Fail with an HTTP error
    Error(u16),
    /// Panic inside the driver
    Panic,
}

/// Driver replaying a fixed sequence of replies.
///
/// Clones share the script and the recorded prompts, so a test can keep a
/// clone after handing the driver to the engine. Once the script runs out
/// every call fails.
#[derive(Debug, Clone)]
pub struct MockStoryDriver {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockStoryDriver {
    /// Driver replying with the given texts in order.
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new_sequence(texts.into_iter().map(|t| MockResponse::Text(t.into())))
    }

    /// Driver replaying arbitrary responses.
    pub fn new_sequence(responses: impl IntoIterator<Item = MockResponse>) -> Self {
        Self {
            script: Arc::new(Mutex::new(responses.into_iter().collect())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    /// Make every call wait for a permit from `gate`.
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Replies not consumed yet.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl StoryDriver for MockStoryDriver {
    async fn generate(&self, req: &GenerateRequest) -> FeuilletonResult<GenerateResponse> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        self.prompts.lock().unwrap().push(req.prompt().clone());
        let next = self.script.lock().unwrap().pop_front();

        match next {
            Some(MockResponse::Text(text)) => Ok(GenerateResponse::new(text)),
            Some(MockResponse::Error(status_code)) => Err(GeminiError::new(
                GeminiErrorKind::HttpError {
                    status_code,
                    message: "scripted failure".to_string(),
                },
            )
            .into()),
            Some(MockResponse::Panic) => panic!("scripted driver panic"),
            None => Err(GeminiError::new(GeminiErrorKind::EmptyResponse(
                "script exhausted".to_string(),
            ))
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-writer"
    }
}
