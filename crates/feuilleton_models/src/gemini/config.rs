//! Gemini client settings.

use serde::{Deserialize, Serialize};

/// Model and sampling settings for [`GeminiClient`](crate::GeminiClient).
///
/// # Examples
///
/// ```
/// use feuilleton_models::GeminiConfig;
///
/// let config = GeminiConfig::default().with_name("gemini-2.5-pro");
/// assert_eq!(config.name(), "gemini-2.5-pro");
/// assert_eq!(*config.request_timeout_secs(), 300);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_", into)]
pub struct GeminiConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    name: String,
    /// Base URL of the REST API
    #[serde(default = "default_api_base")]
    api_base: String,
    /// Sampling temperature
    #[serde(default)]
    temperature: Option<f32>,
    /// Nucleus sampling cutoff
    #[serde(default)]
    top_p: Option<f32>,
    /// Top-k sampling cutoff
    #[serde(default)]
    top_k: Option<u32>,
    /// Upper bound on generated tokens
    #[serde(default)]
    max_output_tokens: Option<u32>,
    /// Per-request timeout
    #[serde(default = "default_timeout")]
    request_timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    300
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            api_base: default_api_base(),
            temperature: None,
            top_p: None,
            top_k: None,
            max_output_tokens: None,
            request_timeout_secs: default_timeout(),
        }
    }
}

/// Overrides for the error-specific retry strategy.
///
/// Unset fields fall back to what the failing status suggests, see
/// `GeminiErrorKind::retry_strategy_params`.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_", strip_option)]
pub struct RetryPolicy {
    /// Disable retries entirely
    #[serde(default)]
    #[setters(skip)]
    disabled: bool,
    /// Maximum number of retries after the first failure
    #[serde(default)]
    max_retries: Option<usize>,
    /// Initial backoff in milliseconds
    #[serde(default)]
    initial_backoff_ms: Option<u64>,
    /// Cap on a single backoff delay in seconds
    #[serde(default)]
    max_delay_secs: Option<u64>,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Resolve `(initial_backoff_ms, max_retries, max_delay_secs)` against
    /// the defaults suggested by an error.
    pub fn resolve(&self, suggested: (u64, usize, u64)) -> (u64, usize, u64) {
        let (backoff, retries, delay) = suggested;
        (
            self.initial_backoff_ms.unwrap_or(backoff),
            self.max_retries.unwrap_or(retries),
            self.max_delay_secs.unwrap_or(delay),
        )
    }
}
