//! Diesel row types.

use crate::schema::{attempt_logs, chapters, projects, prompt_templates};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::Value as JsonValue;

/// Database row for a project.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Primary key
    pub id: i32,
    /// Title
    pub title: String,
    /// Genre label
    pub genre: Option<String>,
    /// World-setting object
    pub world_setting: JsonValue,
    /// Rules object
    pub rules: JsonValue,
    /// Running summary
    pub summary: Option<String>,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
}

/// Insertable project row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Title
    pub title: String,
    /// Genre label
    pub genre: Option<String>,
    /// World-setting object
    pub world_setting: JsonValue,
    /// Rules object
    pub rules: JsonValue,
    /// Running summary
    pub summary: Option<String>,
}

/// Database row for a project's template set.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Associations)]
#[diesel(belongs_to(ProjectRow, foreign_key = project_id))]
#[diesel(table_name = prompt_templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PromptTemplatesRow {
    /// Primary key
    pub id: i32,
    /// Owning project
    pub project_id: i32,
    /// Plan template
    pub plan: String,
    /// Write template
    pub write: String,
    /// Review template
    pub review: String,
    /// Summarize template
    pub summarize: String,
    /// Last edit timestamp (UTC)
    pub updated_at: NaiveDateTime,
}

/// Insertable template set row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = prompt_templates)]
pub struct NewPromptTemplatesRow {
    /// Owning project
    pub project_id: i32,
    /// Plan template
    pub plan: String,
    /// Write template
    pub write: String,
    /// Review template
    pub review: String,
    /// Summarize template
    pub summarize: String,
}

/// Partial template edit. `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = prompt_templates)]
pub struct PromptTemplatesChangeset {
    /// Replacement plan template
    pub plan: Option<String>,
    /// Replacement write template
    pub write: Option<String>,
    /// Replacement review template
    pub review: Option<String>,
    /// Replacement summarize template
    pub summarize: Option<String>,
}

/// Database row for an accepted chapter.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Associations)]
#[diesel(belongs_to(ProjectRow, foreign_key = project_id))]
#[diesel(table_name = chapters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChapterRow {
    /// Primary key
    pub id: i32,
    /// Owning project
    pub project_id: i32,
    /// 1-based chapter number
    pub chapter_number: i32,
    /// Chapter body
    pub content: String,
    /// Review score
    pub score: i32,
    /// Review feedback
    pub feedback: Option<String>,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
}

/// Insertable chapter row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = chapters)]
pub struct NewChapterRow {
    /// Owning project
    pub project_id: i32,
    /// 1-based chapter number
    pub chapter_number: i32,
    /// Chapter body
    pub content: String,
    /// Review score
    pub score: i32,
    /// Review feedback
    pub feedback: Option<String>,
}

/// Database row for an attempt log entry.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = attempt_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttemptLogRow {
    /// Primary key
    pub id: i32,
    /// Owning project
    pub project_id: i32,
    /// Chapter being generated
    pub chapter_number: i32,
    /// 1-based attempt within the run
    pub attempt_number: i32,
    /// Candidate text
    pub content: String,
    /// Review score
    pub score: i32,
    /// Review feedback
    pub feedback: String,
    /// Review object as parsed
    pub raw_review: JsonValue,
    /// Whether the attempt met the threshold
    pub accepted: bool,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
}

/// Insertable attempt log row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attempt_logs)]
pub struct NewAttemptLogRow {
    /// Owning project
    pub project_id: i32,
    /// Chapter being generated
    pub chapter_number: i32,
    /// 1-based attempt within the run
    pub attempt_number: i32,
    /// Candidate text
    pub content: String,
    /// Review score
    pub score: i32,
    /// Review feedback
    pub feedback: String,
    /// Review object as parsed
    pub raw_review: JsonValue,
    /// Whether the attempt met the threshold
    pub accepted: bool,
}
