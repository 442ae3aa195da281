//! Trait definitions for Feuilleton.
//!
//! [`StoryDriver`] abstracts the language model backend. The repository
//! traits abstract durable storage of projects, chapters and attempt logs;
//! [`StoryStore`] bundles all three for components that need every one.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod filter;
mod repository;

pub use driver::StoryDriver;
pub use filter::ProjectFilter;
pub use repository::{AttemptLogRepository, ChapterRepository, ProjectRepository, StoryStore};
