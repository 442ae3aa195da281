//! Feuilleton - serialized web-novel generation
//!
//! Feuilleton keeps a story bible for each novel project (world-setting,
//! rules, running summary) and extends the serial one chapter at a time.
//! A run plans the chapter, writes it, asks the model to review its own
//! draft and retries with the feedback until a draft scores high enough.
//! Accepted chapters are folded back into the summary and world-setting.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use feuilleton::{
//!     FeuilletonConfig, GeminiClient, InMemoryStoryStore, NewProject, RunCoordinator,
//!     StoryService,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FeuilletonConfig::load()?;
//! let store = Arc::new(InMemoryStoryStore::new());
//! let service = StoryService::new(store.clone());
//!
//! let project = service
//!     .create_project(NewProject::builder().title("The Lantern Keeper").build()?)
//!     .await?;
//!
//! let client = GeminiClient::from_env(config.model().clone(), config.retry().clone())?;
//! let coordinator = RunCoordinator::new(client, store);
//! let outcome = coordinator
//!     .start(*project.id(), *config.generation())
//!     .await?
//!     .wait()
//!     .await?;
//! println!("accepted: {}", outcome.is_accepted());
//! # Ok(())
//! # }
//! ```
//!
//! # Cargo Features
//!
//! - `database` - PostgreSQL story store and the `feuilleton` binary
//!
//! # Architecture
//!
//! - `feuilleton_core` - Projects, chapters, templates, run parameters
//! - `feuilleton_interface` - `StoryDriver` and the repository traits
//! - `feuilleton_error` - Error types
//! - `feuilleton_narrative` - Rendering, context, generation loop, coordinator
//! - `feuilleton_models` - Gemini backend
//! - `feuilleton_database` - PostgreSQL integration
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use config::{ENV_PREFIX, FeuilletonConfig, LoggingConfig};
pub use observability::init_logging;

// Re-export core crates (always available)
pub use feuilleton_core::*;
pub use feuilleton_error::*;
pub use feuilleton_interface::*;
pub use feuilleton_models::*;
pub use feuilleton_narrative::*;

#[cfg(feature = "database")]
pub use feuilleton_database::*;
