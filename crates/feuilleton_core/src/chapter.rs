//! Accepted chapters.

use crate::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An accepted, immutable chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Chapter {
    /// Store-assigned identifier
    id: i32,
    /// Owning project
    project_id: ProjectId,
    /// One-based position in the serial
    chapter_number: i32,
    /// Chapter body
    content: String,
    /// Self-review score of the accepted candidate
    score: i32,
    /// Feedback attached to the accepted candidate
    feedback: Option<String>,
    /// When the chapter was stored
    created_at: DateTime<Utc>,
}

impl Chapter {
    /// Assembles a chapter from stored parts.
    pub fn new(
        id: i32,
        project_id: ProjectId,
        chapter_number: i32,
        content: impl Into<String>,
        score: i32,
        feedback: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            project_id,
            chapter_number,
            content: content.into(),
            score,
            feedback,
            created_at,
        }
    }
}

/// Fields supplied when storing a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct NewChapter {
    /// Owning project
    project_id: ProjectId,
    /// One-based position in the serial
    chapter_number: i32,
    /// Chapter body
    content: String,
    /// Self-review score
    score: i32,
    /// Self-review feedback
    feedback: Option<String>,
}

impl NewChapter {
    /// Describes a chapter to store.
    pub fn new(
        project_id: ProjectId,
        chapter_number: i32,
        content: impl Into<String>,
        score: i32,
        feedback: Option<String>,
    ) -> Self {
        Self {
            project_id,
            chapter_number,
            content: content.into(),
            score,
            feedback,
        }
    }
}
