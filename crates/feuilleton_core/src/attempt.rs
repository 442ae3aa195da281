//! Attempt log entries.
//!
//! Every reviewed candidate leaves one entry, accepted or not. Candidates
//! rejected before review for being too short leave none.

use crate::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored attempt log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AttemptLogEntry {
    /// Store-assigned identifier
    id: i32,
    /// Owning project
    project_id: ProjectId,
    /// Chapter number the attempt was written for
    chapter_number: i32,
    /// One-based attempt ordinal within the run
    attempt_number: i32,
    /// Candidate text
    content: String,
    /// Parsed review score
    score: i32,
    /// Parsed review feedback
    feedback: String,
    /// Review payload as returned by the model
    raw_review: serde_json::Value,
    /// Whether the score met the threshold
    accepted: bool,
    /// When the entry was written
    created_at: DateTime<Utc>,
}

impl AttemptLogEntry {
    /// Attaches store-assigned fields to a new entry.
    pub fn from_new(id: i32, entry: NewAttemptLogEntry, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            project_id: entry.project_id,
            chapter_number: entry.chapter_number,
            attempt_number: entry.attempt_number,
            content: entry.content,
            score: entry.score,
            feedback: entry.feedback,
            raw_review: entry.raw_review,
            accepted: entry.accepted,
            created_at,
        }
    }
}

/// Fields supplied when appending an attempt log entry.
///
/// # Examples
///
/// ```
/// use feuilleton_core::NewAttemptLogEntry;
///
/// let entry = NewAttemptLogEntry::builder()
///     .project_id(1)
///     .chapter_number(4)
///     .attempt_number(2)
///     .content("The lantern guttered.")
///     .score(81)
///     .feedback("Tighten the opening.")
///     .raw_review(serde_json::json!({"score": 81}))
///     .accepted(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(*entry.attempt_number(), 2);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct NewAttemptLogEntry {
    /// Owning project
    project_id: ProjectId,
    /// Chapter number the attempt was written for
    chapter_number: i32,
    /// One-based attempt ordinal
    attempt_number: i32,
    /// Candidate text
    content: String,
    /// Parsed review score
    score: i32,
    /// Parsed review feedback
    feedback: String,
    /// Review payload as returned by the model
    raw_review: serde_json::Value,
    /// Whether the score met the threshold
    accepted: bool,
}

impl NewAttemptLogEntry {
    /// Creates a new entry builder.
    pub fn builder() -> NewAttemptLogEntryBuilder {
        NewAttemptLogEntryBuilder::default()
    }
}
