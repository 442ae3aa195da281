//! Language model backend trait.

use async_trait::async_trait;
use feuilleton_core::{GenerateRequest, GenerateResponse};
use feuilleton_error::FeuilletonResult;

/// Core trait that all model backends implement.
///
/// Implementations may fail; callers that need the never-failing text
/// contract wrap a driver in a storyteller.
#[async_trait]
pub trait StoryDriver: Send + Sync {
    /// Generate text for a single prompt.
    async fn generate(&self, req: &GenerateRequest) -> FeuilletonResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}
