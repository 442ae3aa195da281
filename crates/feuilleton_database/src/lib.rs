//! PostgreSQL story store for Feuilleton.
//!
//! Diesel models and a [`PostgresStoryStore`] implementing every repository
//! trait, plus embedded migrations that create the schema.
//!
//! # Example
//!
//! ```rust,ignore
//! use feuilleton_database::{PostgresStoryStore, establish_connection, run_migrations};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut conn = establish_connection()?;
//! run_migrations(&mut conn)?;
//! let store = PostgresStoryStore::new(conn);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod conversions;
mod models;
mod story_repository;

pub mod schema;

pub use connection::{establish_connection, establish_connection_to, run_migrations};
pub use conversions::{chapter_from_row, entry_from_row, project_from_rows};
pub use models::{
    AttemptLogRow, ChapterRow, NewAttemptLogRow, NewChapterRow, NewProjectRow,
    NewPromptTemplatesRow, ProjectRow, PromptTemplatesChangeset, PromptTemplatesRow,
};
pub use story_repository::PostgresStoryStore;

use feuilleton_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
