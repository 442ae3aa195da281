//! Language model backends for Feuilleton.
//!
//! Currently a single backend: Google Gemini over its REST
//! `generateContent` endpoint, with retries on transient failures.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{
    GeminiCandidate, GeminiClient, GeminiConfig, GeminiContent, GeminiGenerationConfig,
    GeminiPart, GeminiRequest, GeminiResponse, RetryPolicy,
};
