//! Folding an accepted chapter into the project's story state.

use crate::{PromptContext, Storyteller};
use feuilleton_core::{Project, StoryMap};
use feuilleton_error::FeuilletonResult;
use feuilleton_interface::{StoryDriver, StoryStore};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Maximum length of a summary taken from an unstructured reply.
pub const SUMMARY_FALLBACK_CHARS: usize = 1000;

/// World-setting key that receives non-object `updated_settings` values.
const LATEST_UPDATE_KEY: &str = "latest_update";

/// Structured reply of the summarize prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryDigest {
    /// New running summary
    pub summary: String,
    /// Revised world-setting, if the model sent one
    pub updated_settings: Option<Value>,
}

impl StoryDigest {
    /// Parse a summarize reply. Requires an object with a string `summary`.
    pub fn parse(reply: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(reply).ok()?;
        let object = value.as_object()?;
        let summary = object.get("summary")?.as_str()?.to_string();
        let updated_settings = object
            .get("updated_settings")
            .filter(|v| !v.is_null())
            .cloned();
        Some(Self {
            summary,
            updated_settings,
        })
    }

    /// World-setting after applying this digest to `current`.
    ///
    /// An object replaces the world-setting. Any other value is recorded
    /// under `latest_update`. Absent settings keep `current`.
    pub fn apply_to(&self, current: &StoryMap) -> StoryMap {
        match &self.updated_settings {
            Some(Value::Object(world)) => world.clone(),
            Some(other) => {
                let mut world = current.clone();
                world.insert(LATEST_UPDATE_KEY.to_string(), other.clone());
                world
            }
            None => current.clone(),
        }
    }
}

/// Derives and persists the new summary and world-setting.
pub struct StateUpdater<D> {
    storyteller: Storyteller<D>,
    store: Arc<dyn StoryStore>,
}

impl<D> Clone for StateUpdater<D> {
    fn clone(&self) -> Self {
        Self {
            storyteller: self.storyteller.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

impl<D: StoryDriver> StateUpdater<D> {
    /// Create an updater.
    pub fn new(storyteller: Storyteller<D>, store: Arc<dyn StoryStore>) -> Self {
        Self { storyteller, store }
    }

    /// Summarize `chapter_text` into the project state and persist it.
    ///
    /// When the structured reply cannot be parsed the free-text reply to the
    /// same prompt, cut to [`SUMMARY_FALLBACK_CHARS`], becomes the summary and
    /// the world-setting is left alone.
    #[instrument(skip(self, project, chapter_text, context), fields(project_id = project.id()))]
    pub async fn update(
        &self,
        project: &Project,
        chapter_text: &str,
        context: &PromptContext,
    ) -> FeuilletonResult<Project> {
        let mut context = context.clone();
        context.insert("content", chapter_text);
        let prompt = context.render(project.prompts().summarize());

        let reply = self.storyteller.generate_structured(&prompt).await;
        let (summary, world) = match StoryDigest::parse(&reply) {
            Some(digest) => {
                let world = digest.apply_to(project.world_setting());
                (digest.summary, world)
            }
            None => {
                warn!("Summary reply was not structured, falling back to free text");
                let text = self.storyteller.generate(&prompt).await;
                let summary: String = text.chars().take(SUMMARY_FALLBACK_CHARS).collect();
                (summary, project.world_setting().clone())
            }
        };

        let updated = self
            .store
            .update_story_state(*project.id(), world, summary)
            .await?;
        info!(
            summary_chars = updated.summary().as_deref().map_or(0, str::len),
            "Story state updated"
        );
        Ok(updated)
    }
}
