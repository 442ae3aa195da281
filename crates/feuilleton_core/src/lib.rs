//! Core data types for the Feuilleton serial fiction engine.
//!
//! Projects, prompt templates, chapters, attempt log entries and the
//! parameters of a generation run. Storage and model backends live in
//! other crates and exchange these types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attempt;
mod chapter;
mod config;
mod project;
mod prompts;
mod request;

pub use attempt::{AttemptLogEntry, NewAttemptLogEntry, NewAttemptLogEntryBuilder};
pub use chapter::{Chapter, NewChapter};
pub use config::{
    DEFAULT_CONTEXT_WINDOW, DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_SCORE, GenerationConfig,
    MAX_ATTEMPTS_LIMIT,
};
pub use project::{NewProject, NewProjectBuilder, Project, ProjectId, StoryMap};
pub use prompts::{PromptKind, PromptTemplates, PromptTemplatesUpdate};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
