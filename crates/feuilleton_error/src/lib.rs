//! Error types for the Feuilleton engine.
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with the source location that raised it
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! # Examples
//!
//! ```
//! use feuilleton_error::{FeuilletonResult, StorageError, StorageErrorKind};
//!
//! fn fetch_chapter() -> FeuilletonResult<String> {
//!     Err(StorageError::new(StorageErrorKind::ProjectNotFound(7)))?
//! }
//!
//! assert!(fetch_chapter().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod gemini;
mod generation;
mod json;
mod storage;

pub use backend::BackendError;
pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{FeuilletonError, FeuilletonErrorKind, FeuilletonResult};
pub use gemini::{GeminiError, GeminiErrorKind, RetryableError};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
