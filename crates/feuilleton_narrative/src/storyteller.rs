//! Never-failing text generation on top of a fallible driver.

use crate::strip_code_fences;
use feuilleton_core::GenerateRequest;
use feuilleton_interface::StoryDriver;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Instruction appended to prompts that expect a JSON reply.
pub const JSON_ONLY_DIRECTIVE: &str =
    "\n\nRespond with a single valid JSON object only. Do not add commentary or markdown.";

/// Adapts a [`StoryDriver`] to the contract the generation loop relies on.
///
/// Driver failures are logged and surface as an empty string, so one bad
/// call costs an attempt instead of the run.
#[derive(Debug)]
pub struct Storyteller<D> {
    driver: Arc<D>,
}

impl<D> Clone for Storyteller<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
        }
    }
}

impl<D: StoryDriver> Storyteller<D> {
    /// Wrap a driver.
    pub fn new(driver: D) -> Self {
        Self {
            driver: Arc::new(driver),
        }
    }

    /// Wrap a shared driver.
    pub fn from_shared(driver: Arc<D>) -> Self {
        Self { driver }
    }

    /// The wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Generate free text. Returns an empty string on any failure.
    #[instrument(skip(self, prompt), fields(provider = self.driver.provider_name(), prompt_chars = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> String {
        let request = match GenerateRequest::builder().prompt(prompt).build() {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Failed to build generation request");
                return String::new();
            }
        };

        match self.driver.generate(&request).await {
            Ok(response) => {
                debug!(response_chars = response.text.len(), "Generation succeeded");
                response.text
            }
            Err(e) => {
                warn!(error = %e, model = self.driver.model_name(), "Generation failed");
                String::new()
            }
        }
    }

    /// Generate a reply meant to be JSON.
    ///
    /// Appends [`JSON_ONLY_DIRECTIVE`], strips markdown fences and returns
    /// `"{}"` when nothing usable came back. The result is not validated.
    pub async fn generate_structured(&self, prompt: &str) -> String {
        let prompt = format!("{prompt}{JSON_ONLY_DIRECTIVE}");
        let cleaned = strip_code_fences(&self.generate(&prompt).await);
        if cleaned.is_empty() {
            "{}".to_string()
        } else {
            cleaned
        }
    }
}
