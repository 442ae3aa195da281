//! Template variables for a chapter.

use crate::PromptContext;
use feuilleton_core::{Chapter, Project};
use feuilleton_error::FeuilletonResult;
use feuilleton_interface::StoryStore;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Summary text used before the first chapter is accepted.
pub const EMPTY_SUMMARY: &str = "story has just begun";

/// Builds the variables every template of a run can reference.
///
/// | key | value |
/// |---|---|
/// | `chapter_num` | chapter being written |
/// | `title` | project title |
/// | `genre` | project genre, or empty |
/// | `summary` | running summary, or [`EMPTY_SUMMARY`] |
/// | `world` | world-setting as JSON |
/// | `rules_json` | rules as JSON |
/// | `context` | recent chapters, see [`format_recent_chapters`] |
///
/// Every top-level rule key is then copied in as its own variable. A rule
/// named like one of the keys above replaces it.
#[derive(Clone)]
pub struct ContextBuilder {
    store: Arc<dyn StoryStore>,
}

impl std::fmt::Debug for ContextBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextBuilder").finish_non_exhaustive()
    }
}

impl ContextBuilder {
    /// Create a builder reading chapters from `store`.
    pub fn new(store: Arc<dyn StoryStore>) -> Self {
        Self { store }
    }

    /// Build the context for `chapter_number` with the last `window` chapters.
    #[instrument(skip(self, project), fields(project_id = project.id()))]
    pub async fn build(
        &self,
        project: &Project,
        chapter_number: i32,
        window: usize,
    ) -> FeuilletonResult<PromptContext> {
        let recent = if window == 0 {
            Vec::new()
        } else {
            self.store.recent_chapters(*project.id(), window).await?
        };
        tracing::debug!(recent = recent.len(), "Loaded recent chapters");

        let summary = project
            .summary()
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(EMPTY_SUMMARY);

        let mut context = PromptContext::new();
        context.insert("chapter_num", chapter_number);
        context.insert("title", project.title().as_str());
        context.insert("genre", project.genre().clone().unwrap_or_default());
        context.insert("summary", summary);
        context.insert("world", Value::Object(project.world_setting().clone()).to_string());
        context.insert("rules_json", Value::Object(project.rules().clone()).to_string());
        context.insert("context", format_recent_chapters(&recent));

        context.extend(
            project
                .rules()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        Ok(context)
    }
}

/// Concatenate chapters as `"\n[Chapter N]\n<body>\n"` blocks in the given order.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use feuilleton_core::Chapter;
/// use feuilleton_narrative::format_recent_chapters;
///
/// let chapters = vec![
///     Chapter::new(1, 1, 1, "Dawn.", 96, None, Utc::now()),
///     Chapter::new(2, 1, 2, "Dusk.", 97, None, Utc::now()),
/// ];
/// assert_eq!(
///     format_recent_chapters(&chapters),
///     "\n[Chapter 1]\nDawn.\n\n[Chapter 2]\nDusk.\n"
/// );
/// ```
pub fn format_recent_chapters(chapters: &[Chapter]) -> String {
    chapters
        .iter()
        .map(|c| format!("\n[Chapter {}]\n{}\n", c.chapter_number(), c.content()))
        .collect()
}
