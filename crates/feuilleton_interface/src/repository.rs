//! Story store traits.

use crate::ProjectFilter;
use async_trait::async_trait;
use feuilleton_core::{
    AttemptLogEntry, Chapter, NewAttemptLogEntry, NewChapter, NewProject, Project, ProjectId,
    PromptTemplates, PromptTemplatesUpdate, StoryMap,
};
use feuilleton_error::FeuilletonResult;

/// Persistence of projects and their prompt templates.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Create a project together with its template set in one atomic write.
    async fn create_project(
        &self,
        project: NewProject,
        prompts: PromptTemplates,
    ) -> FeuilletonResult<Project>;

    /// Load a project, or `None` when it does not exist.
    async fn get_project(&self, id: ProjectId) -> FeuilletonResult<Option<Project>>;

    /// Search projects, newest first.
    async fn search_projects(&self, filter: &ProjectFilter) -> FeuilletonResult<Vec<Project>>;

    /// Replace the world-setting and running summary of a project.
    async fn update_story_state(
        &self,
        id: ProjectId,
        world_setting: StoryMap,
        summary: String,
    ) -> FeuilletonResult<Project>;

    /// Apply a partial template edit and return the resulting set.
    async fn update_prompts(
        &self,
        id: ProjectId,
        update: &PromptTemplatesUpdate,
    ) -> FeuilletonResult<PromptTemplates>;
}

/// Persistence of accepted chapters.
#[async_trait]
pub trait ChapterRepository: Send + Sync {
    /// Store a chapter. Fails when the number is already taken.
    async fn create_chapter(&self, chapter: NewChapter) -> FeuilletonResult<Chapter>;

    /// The chapter with the highest number, if any.
    async fn latest_chapter(&self, project_id: ProjectId) -> FeuilletonResult<Option<Chapter>>;

    /// The last `count` chapters, ordered oldest to newest.
    async fn recent_chapters(
        &self,
        project_id: ProjectId,
        count: usize,
    ) -> FeuilletonResult<Vec<Chapter>>;

    /// Every chapter of a project in serial order.
    async fn list_chapters(&self, project_id: ProjectId) -> FeuilletonResult<Vec<Chapter>>;
}

/// Append-only audit trail of reviewed attempts.
#[async_trait]
pub trait AttemptLogRepository: Send + Sync {
    /// Append one entry. Returns once the entry is durable.
    async fn append_attempt(&self, entry: NewAttemptLogEntry) -> FeuilletonResult<AttemptLogEntry>;

    /// Every entry of a project, most recent first.
    async fn list_attempts(&self, project_id: ProjectId) -> FeuilletonResult<Vec<AttemptLogEntry>>;
}

/// A store providing every repository.
pub trait StoryStore: ProjectRepository + ChapterRepository + AttemptLogRepository {}

impl<T> StoryStore for T where T: ProjectRepository + ChapterRepository + AttemptLogRepository {}
