//! In-memory story store.
//!
//! Keeps every record in maps behind a single `RwLock`, so multi-record writes
//! such as project creation are atomic. All data is lost when the store is
//! dropped. Useful for tests and for trying the engine without a database.

use async_trait::async_trait;
use chrono::Utc;
use feuilleton_core::{
    AttemptLogEntry, Chapter, NewAttemptLogEntry, NewChapter, NewProject, Project, ProjectId,
    PromptTemplates, PromptTemplatesUpdate, StoryMap,
};
use feuilleton_error::{FeuilletonError, FeuilletonResult, StorageError, StorageErrorKind};
use feuilleton_interface::{
    AttemptLogRepository, ChapterRepository, ProjectFilter, ProjectRepository,
};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of every story repository.
///
/// # Example
/// ```no_run
/// use feuilleton_narrative::InMemoryStoryStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryStoryStore::new();
///     assert!(store.is_empty().await);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    projects: HashMap<ProjectId, Project>,
    /// Chapters per project, keyed by chapter number
    chapters: HashMap<ProjectId, BTreeMap<i32, Chapter>>,
    attempts: Vec<AttemptLogEntry>,
    next_project_id: i32,
    next_chapter_id: i32,
    next_attempt_id: i32,
}

impl StoreState {
    fn next_id(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }

    fn project_mut(&mut self, id: ProjectId) -> FeuilletonResult<&mut Project> {
        self.projects
            .get_mut(&id)
            .ok_or_else(|| FeuilletonError::from(StorageError::new(StorageErrorKind::ProjectNotFound(id))))
    }
}

impl InMemoryStoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored projects.
    pub async fn len(&self) -> usize {
        self.state.read().await.projects.len()
    }

    /// Check if no project is stored.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.projects.is_empty()
    }

    /// Remove every record and reset identifiers.
    pub async fn clear(&self) {
        *self.state.write().await = StoreState::default();
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStoryStore {
    async fn create_project(
        &self,
        project: NewProject,
        prompts: PromptTemplates,
    ) -> FeuilletonResult<Project> {
        let mut state = self.state.write().await;
        let id = StoreState::next_id(&mut state.next_project_id);
        let stored = Project::new(
            id,
            project.title().as_str(),
            project.genre().clone(),
            project.world_setting().clone(),
            project.rules().clone(),
            project.summary().clone(),
            prompts,
            Utc::now(),
        );
        state.projects.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_project(&self, id: ProjectId) -> FeuilletonResult<Option<Project>> {
        Ok(self.state.read().await.projects.get(&id).cloned())
    }

    async fn search_projects(&self, filter: &ProjectFilter) -> FeuilletonResult<Vec<Project>> {
        let state = self.state.read().await;
        let mut results: Vec<Project> = state
            .projects
            .values()
            .filter(|p| {
                let world_text = Value::Object(p.world_setting().clone()).to_string();
                filter.matches(
                    p.title(),
                    p.genre().as_deref(),
                    p.summary().as_deref(),
                    &world_text,
                )
            })
            .cloned()
            .collect();

        results.sort_by(|a, b| b.created_at().cmp(a.created_at()).then(b.id().cmp(a.id())));

        let offset = filter.offset.unwrap_or(0);
        let limit = filter.limit.unwrap_or(usize::MAX);
        Ok(results.into_iter().skip(offset).take(limit).collect())
    }

    async fn update_story_state(
        &self,
        id: ProjectId,
        world_setting: StoryMap,
        summary: String,
    ) -> FeuilletonResult<Project> {
        let mut state = self.state.write().await;
        let project = state.project_mut(id)?;
        let updated = project
            .clone()
            .with_world_setting(world_setting)
            .with_summary(Some(summary));
        *project = updated.clone();
        Ok(updated)
    }

    async fn update_prompts(
        &self,
        id: ProjectId,
        update: &PromptTemplatesUpdate,
    ) -> FeuilletonResult<PromptTemplates> {
        let mut state = self.state.write().await;
        let project = state.project_mut(id)?;
        let mut prompts = project.prompts().clone();
        prompts.apply(update);
        *project = project.clone().with_prompts(prompts.clone());
        Ok(prompts)
    }
}

#[async_trait]
impl ChapterRepository for InMemoryStoryStore {
    async fn create_chapter(&self, chapter: NewChapter) -> FeuilletonResult<Chapter> {
        let mut state = self.state.write().await;
        let project_id = *chapter.project_id();
        let chapter_number = *chapter.chapter_number();
        if !state.projects.contains_key(&project_id) {
            return Err(StorageError::new(StorageErrorKind::ProjectNotFound(project_id)).into());
        }
        if state
            .chapters
            .get(&project_id)
            .is_some_and(|chapters| chapters.contains_key(&chapter_number))
        {
            return Err(StorageError::new(StorageErrorKind::DuplicateChapter {
                project_id,
                chapter_number,
            })
            .into());
        }

        let id = StoreState::next_id(&mut state.next_chapter_id);
        let stored = Chapter::new(
            id,
            project_id,
            chapter_number,
            chapter.content().as_str(),
            *chapter.score(),
            chapter.feedback().clone(),
            Utc::now(),
        );
        state
            .chapters
            .entry(project_id)
            .or_default()
            .insert(chapter_number, stored.clone());
        Ok(stored)
    }

    async fn latest_chapter(&self, project_id: ProjectId) -> FeuilletonResult<Option<Chapter>> {
        let state = self.state.read().await;
        Ok(state
            .chapters
            .get(&project_id)
            .and_then(|chapters| chapters.values().next_back().cloned()))
    }

    async fn recent_chapters(
        &self,
        project_id: ProjectId,
        count: usize,
    ) -> FeuilletonResult<Vec<Chapter>> {
        let state = self.state.read().await;
        let Some(chapters) = state.chapters.get(&project_id) else {
            return Ok(Vec::new());
        };
        let mut recent: Vec<Chapter> = chapters.values().rev().take(count).cloned().collect();
        recent.reverse();
        Ok(recent)
    }

    async fn list_chapters(&self, project_id: ProjectId) -> FeuilletonResult<Vec<Chapter>> {
        let state = self.state.read().await;
        Ok(state
            .chapters
            .get(&project_id)
            .map(|chapters| chapters.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl AttemptLogRepository for InMemoryStoryStore {
    async fn append_attempt(&self, entry: NewAttemptLogEntry) -> FeuilletonResult<AttemptLogEntry> {
        let mut state = self.state.write().await;
        let project_id = *entry.project_id();
        if !state.projects.contains_key(&project_id) {
            return Err(StorageError::new(StorageErrorKind::ProjectNotFound(project_id)).into());
        }
        let id = StoreState::next_id(&mut state.next_attempt_id);
        let stored = AttemptLogEntry::from_new(id, entry, Utc::now());
        state.attempts.push(stored.clone());
        Ok(stored)
    }

    async fn list_attempts(&self, project_id: ProjectId) -> FeuilletonResult<Vec<AttemptLogEntry>> {
        let state = self.state.read().await;
        Ok(state
            .attempts
            .iter()
            .rev()
            .filter(|entry| *entry.project_id() == project_id)
            .cloned()
            .collect())
    }
}
