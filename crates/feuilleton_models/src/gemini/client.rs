//! Gemini REST client.

use super::{GeminiConfig, GeminiContent, GeminiGenerationConfig, GeminiRequest, GeminiResponse, RetryPolicy};
use async_trait::async_trait;
use feuilleton_core::{GenerateRequest, GenerateResponse};
use feuilleton_error::{FeuilletonResult, GeminiError, GeminiErrorKind, RetryableError};
use feuilleton_interface::StoryDriver;
use reqwest::Client;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, error, info, instrument, warn};

/// Environment variable holding the API key.
const API_KEY_ENV: &str = "GEMINI_API_KEY";

type GeminiResult<T> = Result<T, GeminiError>;

/// Gemini API client implementing [`StoryDriver`].
///
/// Transient failures (408, 429, 5xx, timeouts) are retried with exponential
/// backoff and jitter. The backoff parameters come from the first failure's
/// status, overridden by the configured [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    config: GeminiConfig,
    retry: RetryPolicy,
}

impl GeminiClient {
    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        config: GeminiConfig,
        retry: RetryPolicy,
    ) -> GeminiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(*config.request_timeout_secs()))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;
        debug!(model = %config.name(), "Creating new Gemini client");
        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
            retry,
        })
    }

    /// Creates a client reading the API key from `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::MissingApiKey`] when the variable is unset
    /// or empty.
    pub fn from_env(config: GeminiConfig, retry: RetryPolicy) -> GeminiResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Self::new(api_key, config, retry)
    }

    /// The client settings.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Endpoint URL for a model.
    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base().trim_end_matches('/'),
            model
        )
    }

    /// Converts a generic request into a Gemini request body.
    ///
    /// Request-level sampling settings take precedence over configured ones.
    ///
    /// # Errors
    ///
    /// Fails only when the request body cannot be assembled.
    pub fn convert_request(&self, request: &GenerateRequest) -> GeminiResult<GeminiRequest> {
        let generation_config = GeminiGenerationConfig::builder()
            .temperature(request.temperature().or(*self.config.temperature()))
            .top_p(*self.config.top_p())
            .top_k(*self.config.top_k())
            .max_output_tokens(request.max_tokens().or(*self.config.max_output_tokens()))
            .build()
            .unwrap_or_default();

        GeminiRequest::builder()
            .contents(vec![GeminiContent::user_text(request.prompt().as_str())])
            .generation_config(Some(generation_config))
            .build()
            .map_err(|e| {
                GeminiError::new(GeminiErrorKind::ApiRequest(format!(
                    "Failed to build request: {}",
                    e
                )))
            })
    }

    /// Sends one request without retries.
    #[instrument(skip(self, body), fields(model = %model))]
    async fn send_once(&self, model: &str, body: &GeminiRequest) -> GeminiResult<GeminiResponse> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Gemini API");
                if e.is_timeout() {
                    GeminiError::new(GeminiErrorKind::Timeout(e.to_string()))
                } else {
                    GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %message, "Gemini API returned error");
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            }));
        }

        response.json::<GeminiResponse>().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Gemini response");
            GeminiError::new(GeminiErrorKind::ApiRequest(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }

    /// Sends a request, retrying transient failures.
    async fn send_with_retry(&self, model: &str, body: &GeminiRequest) -> GeminiResult<GeminiResponse> {
        let first = self.send_once(model, body).await;
        let err = match first {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        if *self.retry.disabled() || !err.is_retryable() {
            return Err(err);
        }

        let (initial_ms, max_retries, max_delay_secs) =
            self.retry.resolve(err.retry_strategy_params());
        if max_retries == 0 {
            return Err(err);
        }
        info!(
            error = %err,
            initial_backoff_ms = initial_ms,
            max_retries,
            max_delay_secs,
            "Gemini request failed, will retry"
        );

        let strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(max_retries);

        let this = self;
        Retry::spawn(strategy, move || async move {
            match this.send_once(model, body).await {
                Ok(response) => Ok(response),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Transient Gemini error, retrying");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Permanent Gemini error, giving up");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await
    }
}

#[async_trait]
impl StoryDriver for GeminiClient {
    #[instrument(skip(self, req), fields(prompt_chars = req.prompt().len()))]
    async fn generate(&self, req: &GenerateRequest) -> FeuilletonResult<GenerateResponse> {
        let model = req.model().as_deref().unwrap_or(self.config.name().as_str());
        let body = self.convert_request(req)?;
        let response = self.send_with_retry(model, &body).await?;

        let text = response.text().ok_or_else(|| {
            let reason = response
                .finish_reason()
                .map(str::to_string)
                .or_else(|| response.prompt_feedback.as_ref().map(|f| f.to_string()))
                .unwrap_or_else(|| "no candidates".to_string());
            GeminiError::new(GeminiErrorKind::EmptyResponse(reason))
        })?;

        debug!(response_chars = text.len(), "Received Gemini response");
        Ok(GenerateResponse::new(text))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        self.config.name()
    }
}
