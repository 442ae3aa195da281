//! Request and response types exchanged with model drivers.

use serde::{Deserialize, Serialize};

/// A single-prompt generation request.
///
/// # Examples
///
/// ```
/// use feuilleton_core::GenerateRequest;
///
/// let request = GenerateRequest::builder()
///     .prompt("Write the opening scene.")
///     .temperature(Some(0.9f32))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.prompt(), "Write the opening scene.");
/// assert_eq!(*request.max_tokens(), None);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Default,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Fully rendered prompt text
    prompt: String,
    /// Maximum number of tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Model identifier override
    #[builder(default)]
    model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Text produced by a model driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GenerateResponse {
    /// Concatenated text of the first candidate
    pub text: String,
}

impl GenerateResponse {
    /// Wraps generated text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
