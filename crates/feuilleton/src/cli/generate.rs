//! Chapter generation command handler.

use feuilleton::{
    FeuilletonResult, GenerationConfig, GenerationOutcome, ProjectId, RunCoordinator, StoryDriver,
};
use tracing::info;

/// Command-line overrides of the configured run parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOverrides {
    /// Replacement for `max_attempts`
    pub max_attempts: Option<u32>,
    /// Replacement for `min_score`
    pub min_score: Option<i32>,
    /// Replacement for `context_window`
    pub context_window: Option<usize>,
}

impl GenerateOverrides {
    /// Apply the set overrides on top of `base`.
    pub fn apply(&self, base: GenerationConfig) -> GenerationConfig {
        let mut config = base;
        if let Some(max_attempts) = self.max_attempts {
            config = config.with_max_attempts(max_attempts);
        }
        if let Some(min_score) = self.min_score {
            config = config.with_min_score(min_score);
        }
        if let Some(context_window) = self.context_window {
            config = config.with_context_window(context_window);
        }
        config
    }
}

/// Start a run for `project_id` and wait for its outcome.
pub async fn run_generation<D: StoryDriver + 'static>(
    coordinator: &RunCoordinator<D>,
    project_id: ProjectId,
    config: GenerationConfig,
) -> FeuilletonResult<()> {
    let handle = coordinator.start(project_id, config).await?;
    info!(
        project_id,
        max_attempts = config.max_attempts(),
        min_score = config.min_score(),
        "Waiting for generation run"
    );

    match handle.wait().await? {
        GenerationOutcome::Accepted { chapter, attempts } => {
            println!(
                "Chapter {} accepted with score {} after {} attempt(s)",
                chapter.chapter_number(),
                chapter.score(),
                attempts
            );
            if let Some(feedback) = chapter.feedback() {
                println!("  Reviewer: {}", feedback);
            }
        }
        GenerationOutcome::Rejected {
            chapter_number,
            best_score,
            attempts,
        } => {
            let best = best_score.map_or_else(|| "none".to_string(), |s| s.to_string());
            println!(
                "Chapter {} not accepted after {} attempt(s); best score {} (threshold {})",
                chapter_number,
                attempts,
                best,
                config.min_score()
            );
            println!("  See `feuilleton history {}` for the reviewed drafts", project_id);
        }
    }
    Ok(())
}
