//! Run admission and background execution.
//!
//! At most one run per project is active at a time. The slot is claimed before
//! the project is looked up and released by a guard the spawned task owns, so
//! it is freed however the run ends, panics included.

use crate::{ChapterGenerator, GenerationOutcome, Storyteller};
use feuilleton_core::{GenerationConfig, ProjectId};
use feuilleton_error::{FeuilletonResult, GenerationError, GenerationErrorKind};
use feuilleton_interface::{StoryDriver, StoryStore};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Set of projects with an active run.
///
/// Cloning shares the underlying set.
#[derive(Debug, Clone, Default)]
pub struct RunRegistry {
    active: Arc<Mutex<HashSet<ProjectId>>>,
}

impl RunRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `project_id`, or `None` when it is taken.
    pub fn try_claim(&self, project_id: ProjectId) -> Option<RunGuard> {
        if self.lock().insert(project_id) {
            Some(RunGuard {
                registry: self.clone(),
                project_id,
            })
        } else {
            None
        }
    }

    /// Returns true while a run for `project_id` holds its slot.
    pub fn is_running(&self, project_id: ProjectId) -> bool {
        self.lock().contains(&project_id)
    }

    /// Projects with an active run, in ascending order.
    pub fn active(&self) -> Vec<ProjectId> {
        let mut ids: Vec<_> = self.lock().iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    // A panic while holding the lock cannot leave the set half-updated.
    fn lock(&self) -> MutexGuard<'_, HashSet<ProjectId>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds a project's run slot until dropped.
#[derive(Debug)]
pub struct RunGuard {
    registry: RunRegistry,
    project_id: ProjectId,
}

impl RunGuard {
    /// The project this guard holds.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.project_id);
        debug!(project_id = self.project_id, "Run slot released");
    }
}

/// Handle to a started run.
#[derive(Debug)]
pub struct RunHandle {
    project_id: ProjectId,
    task: JoinHandle<FeuilletonResult<GenerationOutcome>>,
}

impl RunHandle {
    /// The project being generated.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns true once the background task has finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run to finish.
    ///
    /// Dropping the handle instead leaves the run going in the background.
    ///
    /// # Errors
    ///
    /// Returns the run's own error, or [`GenerationErrorKind::RunAborted`]
    /// when the task panicked or was cancelled.
    pub async fn wait(self) -> FeuilletonResult<GenerationOutcome> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => {
                let reason = if e.is_panic() {
                    "generation task panicked".to_string()
                } else {
                    format!("generation task cancelled: {}", e)
                };
                Err(GenerationError::new(GenerationErrorKind::RunAborted(reason)).into())
            }
        }
    }
}

/// Admits generation runs and executes them in the background.
pub struct RunCoordinator<D> {
    generator: Arc<ChapterGenerator<D>>,
    store: Arc<dyn StoryStore>,
    registry: RunRegistry,
}

impl<D: StoryDriver + 'static> RunCoordinator<D> {
    /// Create a coordinator with its own registry.
    pub fn new(driver: D, store: Arc<dyn StoryStore>) -> Self {
        Self::with_registry(driver, store, RunRegistry::new())
    }

    /// Create a coordinator sharing `registry` with other coordinators.
    pub fn with_registry(driver: D, store: Arc<dyn StoryStore>, registry: RunRegistry) -> Self {
        let generator = ChapterGenerator::new(Storyteller::new(driver), Arc::clone(&store));
        Self {
            generator: Arc::new(generator),
            store,
            registry,
        }
    }

    /// The registry of active runs.
    pub fn registry(&self) -> &RunRegistry {
        &self.registry
    }

    /// Returns true while a run for `project_id` is active.
    pub fn is_running(&self, project_id: ProjectId) -> bool {
        self.registry.is_running(project_id)
    }

    /// Start generating the next chapter of `project_id`.
    ///
    /// Returns as soon as the run is spawned. A conflicting run is rejected
    /// before the store is consulted.
    ///
    /// # Errors
    ///
    /// - [`GenerationErrorKind::InvalidConfig`] for out-of-range parameters
    /// - [`GenerationErrorKind::AlreadyRunning`] when a run is active
    /// - [`GenerationErrorKind::ProjectNotFound`] when the project is missing
    /// - store errors from the existence check
    #[instrument(skip(self, config))]
    pub async fn start(
        &self,
        project_id: ProjectId,
        config: GenerationConfig,
    ) -> FeuilletonResult<RunHandle> {
        config.validate()?;

        let Some(guard) = self.registry.try_claim(project_id) else {
            warn!("Run already in progress");
            return Err(GenerationError::new(GenerationErrorKind::AlreadyRunning(project_id)).into());
        };

        if self.store.get_project(project_id).await?.is_none() {
            warn!("Project not found");
            return Err(GenerationError::new(GenerationErrorKind::ProjectNotFound(project_id)).into());
        }

        let generator = Arc::clone(&self.generator);
        let task = tokio::spawn(async move {
            let _guard = guard;
            let result = generator.run(project_id, &config).await;
            match &result {
                Ok(GenerationOutcome::Accepted { chapter, attempts }) => info!(
                    project_id,
                    chapter = chapter.chapter_number(),
                    attempts,
                    "Run finished with a new chapter"
                ),
                Ok(GenerationOutcome::Rejected {
                    best_score,
                    attempts,
                    ..
                }) => warn!(
                    project_id,
                    best_score = ?best_score,
                    attempts,
                    "Run finished without meeting the threshold"
                ),
                Err(e) => error!(project_id, error = %e, "Run failed"),
            }
            result
        });

        info!("Run started");
        Ok(RunHandle { project_id, task })
    }
}
