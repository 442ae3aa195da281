//! Chapter generation engine for Feuilleton.
//!
//! A run plans a chapter, then writes and self-reviews candidates until one
//! scores at least the configured threshold or the attempt budget runs out.
//! The best candidate becomes the next chapter and is folded back into the
//! project's running summary and world-setting.
//!
//! # Example
//!
//! ```no_run
//! use feuilleton_narrative::{InMemoryStoryStore, RunCoordinator, StoryService};
//! use feuilleton_core::{GenerationConfig, NewProject};
//! # use feuilleton_interface::StoryDriver;
//! # async fn example<D: StoryDriver + 'static>(driver: D) -> feuilleton_error::FeuilletonResult<()> {
//! let store = std::sync::Arc::new(InMemoryStoryStore::new());
//! let service = StoryService::new(store.clone());
//! let project = service
//!     .create_project(NewProject::builder().title("Ember").build().unwrap())
//!     .await?;
//!
//! let coordinator = RunCoordinator::new(driver, store);
//! let handle = coordinator.start(*project.id(), GenerationConfig::default()).await?;
//! let outcome = handle.wait().await?;
//! println!("accepted: {}", outcome.is_accepted());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod candidate;
mod context;
mod coordinator;
mod extraction;
mod generation;
mod in_memory_repository;
mod review;
mod service;
mod state;
mod storyteller;
mod template;

pub use candidate::{Candidate, CandidateTracker};
pub use context::{ContextBuilder, EMPTY_SUMMARY, format_recent_chapters};
pub use coordinator::{RunCoordinator, RunGuard, RunHandle, RunRegistry};
pub use extraction::{extract_json_object, strip_code_fences};
pub use generation::{
    ChapterGenerator, GenerationOutcome, MIN_CANDIDATE_CHARS, revision_directive,
};
pub use in_memory_repository::InMemoryStoryStore;
pub use review::{INVALID_REVIEW_FEEDBACK, MISSING_FEEDBACK, Review};
pub use service::StoryService;
pub use state::{StateUpdater, StoryDigest, SUMMARY_FALLBACK_CHARS};
pub use storyteller::{JSON_ONLY_DIRECTIVE, Storyteller};
pub use template::{PromptContext, render, value_to_prompt_text};
