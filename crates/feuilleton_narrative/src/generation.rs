//! The plan, write, review and accept cycle for one chapter.

use crate::{Candidate, CandidateTracker, ContextBuilder, Review, StateUpdater, Storyteller};
use feuilleton_core::{
    Chapter, GenerationConfig, NewAttemptLogEntry, NewChapter, ProjectId,
};
use feuilleton_error::{BackendError, FeuilletonResult, StorageError, StorageErrorKind};
use feuilleton_interface::{StoryDriver, StoryStore};
use std::sync::Arc;
use tracing::{Instrument, Span, debug, info, instrument, warn};

/// Candidates shorter than this many characters are discarded unreviewed.
pub const MIN_CANDIDATE_CHARS: usize = 500;

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// A candidate met the threshold and was stored.
    Accepted {
        /// The stored chapter
        chapter: Chapter,
        /// Attempts used, including skipped ones
        attempts: u32,
    },
    /// No candidate met the threshold. Only attempt logs were written.
    Rejected {
        /// Chapter number the run targeted
        chapter_number: i32,
        /// Best score seen, if any candidate was reviewed
        best_score: Option<i32>,
        /// Attempts used
        attempts: u32,
    },
}

impl GenerationOutcome {
    /// Returns true when a chapter was stored.
    pub fn is_accepted(&self) -> bool {
        matches!(self, GenerationOutcome::Accepted { .. })
    }

    /// The stored chapter, if any.
    pub fn chapter(&self) -> Option<&Chapter> {
        match self {
            GenerationOutcome::Accepted { chapter, .. } => Some(chapter),
            GenerationOutcome::Rejected { .. } => None,
        }
    }
}

/// Text appended to the write prompt after a rejected attempt.
///
/// # Examples
///
/// ```
/// use feuilleton_narrative::revision_directive;
///
/// assert!(revision_directive("Slow middle.").ends_with("Slow middle."));
/// ```
pub fn revision_directive(feedback: &str) -> String {
    format!(
        "\n\n[Revision request]\nThe previous draft was rejected by the editor. \
         Rewrite the chapter and address this feedback in full:\n{feedback}"
    )
}

/// Runs the generation cycle for one chapter at a time.
pub struct ChapterGenerator<D> {
    storyteller: Storyteller<D>,
    store: Arc<dyn StoryStore>,
    context_builder: ContextBuilder,
    state_updater: StateUpdater<D>,
}

impl<D: StoryDriver + 'static> ChapterGenerator<D> {
    /// Create a generator over a driver and a store.
    pub fn new(storyteller: Storyteller<D>, store: Arc<dyn StoryStore>) -> Self {
        Self {
            context_builder: ContextBuilder::new(Arc::clone(&store)),
            state_updater: StateUpdater::new(storyteller.clone(), Arc::clone(&store)),
            storyteller,
            store,
        }
    }

    /// The storyteller used for every model call.
    pub fn storyteller(&self) -> &Storyteller<D> {
        &self.storyteller
    }

    /// Generate the next chapter of `project_id`.
    ///
    /// Model failures never abort the run: they cost an attempt. Store
    /// failures before the chapter is written do, and are returned as
    /// errors. Once the chapter is stored the run is accepted even if the
    /// summary and world-setting cannot be updated.
    ///
    /// # Errors
    ///
    /// Fails when the project is missing or the store rejects a read or write.
    #[instrument(skip(self, config), fields(max_attempts = config.max_attempts(), min_score = config.min_score()))]
    pub async fn run(
        &self,
        project_id: ProjectId,
        config: &GenerationConfig,
    ) -> FeuilletonResult<GenerationOutcome> {
        let project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| StorageError::new(StorageErrorKind::ProjectNotFound(project_id)))?;

        let chapter_number = self
            .store
            .latest_chapter(project_id)
            .await?
            .map_or(1, |latest| latest.chapter_number() + 1);
        info!(chapter = chapter_number, "Starting chapter generation");

        let min_score = *config.min_score();
        let mut context = self
            .context_builder
            .build(&project, chapter_number, *config.context_window())
            .await?;

        let plot = self
            .storyteller
            .generate(&context.render(project.prompts().plan()))
            .await;
        if plot.is_empty() {
            warn!(chapter = chapter_number, "Plan came back empty, writing without an outline");
        }
        context.insert("plot", plot);

        let mut tracker = CandidateTracker::new();
        let mut last_feedback: Option<String> = None;
        let mut attempts = 0;

        for attempt in 1..=*config.max_attempts() {
            attempts = attempt;

            let mut write_prompt = context.render(project.prompts().write());
            if let Some(feedback) = &last_feedback {
                write_prompt.push_str(&revision_directive(feedback));
            }

            let candidate = self.storyteller.generate(&write_prompt).await;
            let length = candidate.chars().count();
            if length < MIN_CANDIDATE_CHARS {
                warn!(attempt, length, "Candidate too short, skipping review");
                continue;
            }

            context.insert("content", candidate.as_str());
            let reply = self
                .storyteller
                .generate_structured(&context.render(project.prompts().review()))
                .await;
            let review = Review::parse(&reply);
            let accepted = review.score >= min_score;

            let entry = NewAttemptLogEntry::builder()
                .project_id(project_id)
                .chapter_number(chapter_number)
                .attempt_number(attempt as i32)
                .content(candidate.as_str())
                .score(review.score)
                .feedback(review.feedback.as_str())
                .raw_review(review.raw.clone())
                .accepted(accepted)
                .build()
                .map_err(|e| BackendError::new(format!("Failed to build attempt entry: {}", e)))?;
            self.store.append_attempt(entry).await?;

            info!(attempt, score = review.score, accepted, "Attempt reviewed");

            if tracker.consider(Candidate::new(review.score, candidate, review.feedback.as_str())) {
                debug!(attempt, score = review.score, "New best candidate");
            }
            last_feedback = Some(review.feedback);

            if accepted {
                break;
            }
        }

        let best = match tracker.into_best() {
            Some(best) if *best.score() >= min_score => best,
            other => {
                let best_score = other.map(|c| *c.score());
                warn!(
                    chapter = chapter_number,
                    best_score = ?best_score,
                    attempts,
                    "No candidate met the threshold"
                );
                return Ok(GenerationOutcome::Rejected {
                    chapter_number,
                    best_score,
                    attempts,
                });
            }
        };

        let chapter = self
            .store
            .create_chapter(NewChapter::new(
                project_id,
                chapter_number,
                best.content().as_str(),
                *best.score(),
                Some(best.feedback().clone()),
            ))
            .await?;
        info!(chapter = chapter_number, score = best.score(), "Chapter stored");

        // The chapter is durable from here on. A failed state update leaves
        // the previous summary and world-setting in place.
        let updater = self.state_updater.clone();
        let chapter_text = chapter.content().clone();
        let update = tokio::spawn(
            async move { updater.update(&project, &chapter_text, &context).await }
                .instrument(Span::current()),
        );
        match update.await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!(
                chapter = chapter_number,
                error = %e,
                "Story state update failed, summary and world-setting unchanged"
            ),
            Err(e) => warn!(
                chapter = chapter_number,
                error = %e,
                "Story state update aborted, summary and world-setting unchanged"
            ),
        }

        Ok(GenerationOutcome::Accepted { chapter, attempts })
    }
}
