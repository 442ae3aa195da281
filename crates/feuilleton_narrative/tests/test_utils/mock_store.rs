//! Store wrapper with failure injection.

use async_trait::async_trait;
use feuilleton_core::{
    AttemptLogEntry, Chapter, NewAttemptLogEntry, NewChapter, NewProject, Project, ProjectId,
    PromptTemplates, PromptTemplatesUpdate, StoryMap,
};
use feuilleton_error::{FeuilletonError, FeuilletonResult, StorageError, StorageErrorKind};
use feuilleton_interface::{
    AttemptLogRepository, ChapterRepository, ProjectFilter, ProjectRepository,
};
use feuilleton_narrative::InMemoryStoryStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory store that counts project lookups and can refuse attempt or
/// story-state writes.
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
    pub inner: InMemoryStoryStore,
    fail_appends: Arc<AtomicBool>,
    fail_state_updates: Arc<AtomicBool>,
    project_lookups: Arc<AtomicUsize>,
}

impl FlakyStore {
    pub fn new(inner: InMemoryStoryStore) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }

    /// Make every `append_attempt` fail from now on.
    pub fn fail_appends(&self) {
        self.fail_appends.store(true, Ordering::SeqCst);
    }

    /// Make every `update_story_state` fail from now on.
    pub fn fail_state_updates(&self) {
        self.fail_state_updates.store(true, Ordering::SeqCst);
    }

    /// Number of `get_project` calls so far.
    pub fn project_lookups(&self) -> usize {
        self.project_lookups.load(Ordering::SeqCst)
    }
}

fn injected_failure() -> FeuilletonError {
    StorageError::new(StorageErrorKind::Unavailable("injected failure".to_string())).into()
}

#[async_trait]
impl ProjectRepository for FlakyStore {
    async fn create_project(
        &self,
        project: NewProject,
        prompts: PromptTemplates,
    ) -> FeuilletonResult<Project> {
        self.inner.create_project(project, prompts).await
    }

    async fn get_project(&self, id: ProjectId) -> FeuilletonResult<Option<Project>> {
        self.project_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_project(id).await
    }

    async fn search_projects(&self, filter: &ProjectFilter) -> FeuilletonResult<Vec<Project>> {
        self.inner.search_projects(filter).await
    }

    async fn update_story_state(
        &self,
        id: ProjectId,
        world_setting: StoryMap,
        summary: String,
    ) -> FeuilletonResult<Project> {
        if self.fail_state_updates.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.inner.update_story_state(id, world_setting, summary).await
    }

    async fn update_prompts(
        &self,
        id: ProjectId,
        update: &PromptTemplatesUpdate,
    ) -> FeuilletonResult<PromptTemplates> {
        self.inner.update_prompts(id, update).await
    }
}

#[async_trait]
impl ChapterRepository for FlakyStore {
    async fn create_chapter(&self, chapter: NewChapter) -> FeuilletonResult<Chapter> {
        self.inner.create_chapter(chapter).await
    }

    async fn latest_chapter(&self, project_id: ProjectId) -> FeuilletonResult<Option<Chapter>> {
        self.inner.latest_chapter(project_id).await
    }

    async fn recent_chapters(
        &self,
        project_id: ProjectId,
        count: usize,
    ) -> FeuilletonResult<Vec<Chapter>> {
        self.inner.recent_chapters(project_id, count).await
    }

    async fn list_chapters(&self, project_id: ProjectId) -> FeuilletonResult<Vec<Chapter>> {
        self.inner.list_chapters(project_id).await
    }
}

#[async_trait]
impl AttemptLogRepository for FlakyStore {
    async fn append_attempt(&self, entry: NewAttemptLogEntry) -> FeuilletonResult<AttemptLogEntry> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.inner.append_attempt(entry).await
    }

    async fn list_attempts(&self, project_id: ProjectId) -> FeuilletonResult<Vec<AttemptLogEntry>> {
        self.inner.list_attempts(project_id).await
    }
}
