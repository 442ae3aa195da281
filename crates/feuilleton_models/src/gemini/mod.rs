//! Google Gemini REST backend.

mod client;
mod config;
mod dto;

pub use client::GeminiClient;
pub use config::{GeminiConfig, RetryPolicy};
pub use dto::{
    GeminiCandidate, GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest,
    GeminiResponse,
};
