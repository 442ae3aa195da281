//! Project-level operations around the generation engine.

use feuilleton_core::{
    AttemptLogEntry, Chapter, NewProject, Project, ProjectId, PromptTemplates,
    PromptTemplatesUpdate,
};
use feuilleton_error::{FeuilletonResult, StorageError, StorageErrorKind};
use feuilleton_interface::{ProjectFilter, StoryStore};
use std::sync::Arc;
use tracing::{info, instrument};

/// Creates, finds and edits projects and exposes their chapters and history.
#[derive(Clone)]
pub struct StoryService {
    store: Arc<dyn StoryStore>,
}

impl StoryService {
    /// Create a service over `store`.
    pub fn new(store: Arc<dyn StoryStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn StoryStore> {
        &self.store
    }

    /// Create a project with the built-in prompt templates.
    #[instrument(skip(self, project), fields(title = %project.title()))]
    pub async fn create_project(&self, project: NewProject) -> FeuilletonResult<Project> {
        let created = self
            .store
            .create_project(project, PromptTemplates::default())
            .await?;
        info!(project_id = created.id(), "Project created");
        Ok(created)
    }

    /// Load a project.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::ProjectNotFound`] when it does not exist.
    pub async fn get_project(&self, id: ProjectId) -> FeuilletonResult<Project> {
        self.store
            .get_project(id)
            .await?
            .ok_or_else(|| StorageError::new(StorageErrorKind::ProjectNotFound(id)).into())
    }

    /// Search projects, newest first.
    pub async fn search_projects(&self, filter: &ProjectFilter) -> FeuilletonResult<Vec<Project>> {
        self.store.search_projects(filter).await
    }

    /// Edit some of a project's templates.
    #[instrument(skip(self, update))]
    pub async fn update_prompts(
        &self,
        id: ProjectId,
        update: PromptTemplatesUpdate,
    ) -> FeuilletonResult<PromptTemplates> {
        let prompts = self.store.update_prompts(id, &update).await?;
        info!("Prompt templates updated");
        Ok(prompts)
    }

    /// Every chapter of a project in serial order.
    pub async fn chapters(&self, id: ProjectId) -> FeuilletonResult<Vec<Chapter>> {
        self.get_project(id).await?;
        self.store.list_chapters(id).await
    }

    /// Every attempt log entry of a project, most recent first.
    pub async fn history(&self, id: ProjectId) -> FeuilletonResult<Vec<AttemptLogEntry>> {
        self.get_project(id).await?;
        self.store.list_attempts(id).await
    }
}
