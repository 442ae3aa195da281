//! Conversions between diesel rows and domain types.

use crate::models::{
    AttemptLogRow, ChapterRow, NewAttemptLogRow, NewChapterRow, NewProjectRow,
    NewPromptTemplatesRow, ProjectRow, PromptTemplatesChangeset, PromptTemplatesRow,
};
use feuilleton_core::{
    AttemptLogEntry, Chapter, NewAttemptLogEntry, NewChapter, NewProject, Project, ProjectId,
    PromptTemplates, PromptTemplatesUpdate, StoryMap,
};
use feuilleton_error::{StorageError, StorageErrorKind};
use serde_json::Value as JsonValue;

fn json_object(
    value: JsonValue,
    column: &str,
    project_id: ProjectId,
) -> Result<StoryMap, StorageError> {
    match value {
        JsonValue::Object(map) => Ok(map),
        JsonValue::Null => Ok(StoryMap::new()),
        other => Err(StorageError::new(StorageErrorKind::Corrupt(format!(
            "project {} column {} holds {} instead of an object",
            project_id, column, other
        )))),
    }
}

/// Assemble a project from its row and its template row.
pub fn project_from_rows(
    row: ProjectRow,
    prompts: PromptTemplatesRow,
) -> Result<Project, StorageError> {
    let world_setting = json_object(row.world_setting, "world_setting", row.id)?;
    let rules = json_object(row.rules, "rules", row.id)?;
    Ok(Project::new(
        row.id,
        row.title,
        row.genre,
        world_setting,
        rules,
        row.summary,
        templates_from_row(prompts),
        row.created_at.and_utc(),
    ))
}

pub(crate) fn templates_from_row(row: PromptTemplatesRow) -> PromptTemplates {
    PromptTemplates::new(row.plan, row.write, row.review, row.summarize)
}

/// Convert a chapter row.
pub fn chapter_from_row(row: ChapterRow) -> Chapter {
    Chapter::new(
        row.id,
        row.project_id,
        row.chapter_number,
        row.content,
        row.score,
        row.feedback,
        row.created_at.and_utc(),
    )
}

/// Convert an attempt log row.
pub fn entry_from_row(row: AttemptLogRow) -> Result<AttemptLogEntry, StorageError> {
    let created_at = row.created_at.and_utc();
    let entry = NewAttemptLogEntry::builder()
        .project_id(row.project_id)
        .chapter_number(row.chapter_number)
        .attempt_number(row.attempt_number)
        .content(row.content)
        .score(row.score)
        .feedback(row.feedback)
        .raw_review(row.raw_review)
        .accepted(row.accepted)
        .build()
        .map_err(|e| StorageError::new(StorageErrorKind::Corrupt(e.to_string())))?;
    Ok(AttemptLogEntry::from_new(row.id, entry, created_at))
}

impl From<&NewProject> for NewProjectRow {
    fn from(project: &NewProject) -> Self {
        Self {
            title: project.title().clone(),
            genre: project.genre().clone(),
            world_setting: JsonValue::Object(project.world_setting().clone()),
            rules: JsonValue::Object(project.rules().clone()),
            summary: project.summary().clone(),
        }
    }
}

impl NewPromptTemplatesRow {
    /// Row for a freshly created project.
    pub fn for_project(project_id: ProjectId, prompts: &PromptTemplates) -> Self {
        Self {
            project_id,
            plan: prompts.plan().clone(),
            write: prompts.write().clone(),
            review: prompts.review().clone(),
            summarize: prompts.summarize().clone(),
        }
    }
}

impl From<&PromptTemplatesUpdate> for PromptTemplatesChangeset {
    fn from(update: &PromptTemplatesUpdate) -> Self {
        Self {
            plan: update.plan().clone(),
            write: update.write().clone(),
            review: update.review().clone(),
            summarize: update.summarize().clone(),
        }
    }
}

impl From<NewChapter> for NewChapterRow {
    fn from(chapter: NewChapter) -> Self {
        Self {
            project_id: *chapter.project_id(),
            chapter_number: *chapter.chapter_number(),
            content: chapter.content().clone(),
            score: *chapter.score(),
            feedback: chapter.feedback().clone(),
        }
    }
}

impl From<NewAttemptLogEntry> for NewAttemptLogRow {
    fn from(entry: NewAttemptLogEntry) -> Self {
        Self {
            project_id: *entry.project_id(),
            chapter_number: *entry.chapter_number(),
            attempt_number: *entry.attempt_number(),
            content: entry.content().clone(),
            score: *entry.score(),
            feedback: entry.feedback().clone(),
            raw_review: entry.raw_review().clone(),
            accepted: *entry.accepted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn prompt_row(project_id: i32) -> PromptTemplatesRow {
        PromptTemplatesRow {
            id: 11,
            project_id,
            plan: "plan {chapter_num}".to_string(),
            write: "write {plot}".to_string(),
            review: "review {content}".to_string(),
            summarize: "summarize {content}".to_string(),
            updated_at: timestamp(),
        }
    }

    fn project_row(world: JsonValue) -> ProjectRow {
        ProjectRow {
            id: 4,
            title: "Salt Roads".to_string(),
            genre: Some("adventure".to_string()),
            world_setting: world,
            rules: json!({"tense": "past"}),
            summary: None,
            created_at: timestamp(),
        }
    }

    #[test]
    fn test_project_from_rows() {
        let project =
            project_from_rows(project_row(json!({"port": "Ashmouth"})), prompt_row(4)).unwrap();

        assert_eq!(*project.id(), 4);
        assert_eq!(project.title(), "Salt Roads");
        assert_eq!(project.world_setting()["port"], "Ashmouth");
        assert_eq!(project.rules()["tense"], "past");
        assert_eq!(project.prompts().plan(), "plan {chapter_num}");
        assert_eq!(project.created_at().naive_utc(), timestamp());
    }

    #[test]
    fn test_null_world_reads_as_empty() {
        let project = project_from_rows(project_row(JsonValue::Null), prompt_row(4)).unwrap();
        assert!(project.world_setting().is_empty());
    }

    #[test]
    fn test_non_object_world_is_corrupt() {
        let err = project_from_rows(project_row(json!([1, 2])), prompt_row(4)).unwrap_err();
        assert!(matches!(err.kind, StorageErrorKind::Corrupt(_)));
    }

    #[test]
    fn test_changeset_keeps_absent_fields_unset() {
        let update = PromptTemplatesUpdate::default().with_review("new review");
        let changeset = PromptTemplatesChangeset::from(&update);

        assert_eq!(changeset.review.as_deref(), Some("new review"));
        assert!(changeset.plan.is_none());
        assert!(changeset.write.is_none());
        assert!(changeset.summarize.is_none());
    }

    #[test]
    fn test_entry_from_row() {
        let row = AttemptLogRow {
            id: 9,
            project_id: 4,
            chapter_number: 2,
            attempt_number: 3,
            content: "text".to_string(),
            score: 81,
            feedback: "tighter pacing".to_string(),
            raw_review: json!({"score": 81, "feedback": "tighter pacing"}),
            accepted: false,
            created_at: timestamp(),
        };
        let entry = entry_from_row(row).unwrap();

        assert_eq!(*entry.id(), 9);
        assert_eq!(*entry.attempt_number(), 3);
        assert_eq!(*entry.score(), 81);
        assert!(!entry.accepted());
        assert_eq!(entry.raw_review()["score"], 81);
    }
}
