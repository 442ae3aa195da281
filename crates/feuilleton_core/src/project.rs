//! Novel projects.

use crate::PromptTemplates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a stored project.
pub type ProjectId = i32;

/// Open-ended JSON object used for world-settings and rules.
pub type StoryMap = serde_json::Map<String, serde_json::Value>;

/// A stored novel project with its prompt templates.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct Project {
    /// Store-assigned identifier
    #[setters(skip)]
    id: ProjectId,
    /// Novel title
    title: String,
    /// Genre label, if any
    genre: Option<String>,
    /// World-setting, rewritten after every accepted chapter
    world_setting: StoryMap,
    /// Fixed writing rules
    rules: StoryMap,
    /// Running summary of the story so far
    summary: Option<String>,
    /// Prompt templates owned by this project
    prompts: PromptTemplates,
    /// When the project was created
    #[setters(skip)]
    created_at: DateTime<Utc>,
}

impl Project {
    /// Assembles a project from stored parts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProjectId,
        title: impl Into<String>,
        genre: Option<String>,
        world_setting: StoryMap,
        rules: StoryMap,
        summary: Option<String>,
        prompts: PromptTemplates,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            genre,
            world_setting,
            rules,
            summary,
            prompts,
            created_at,
        }
    }
}

/// Fields supplied when creating a project.
///
/// # Examples
///
/// ```
/// use feuilleton_core::NewProject;
///
/// let project = NewProject::builder()
///     .title("The Lantern Keeper")
///     .genre(Some("fantasy".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(project.title(), "The Lantern Keeper");
/// assert!(project.world_setting().is_empty());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct NewProject {
    /// Novel title
    title: String,
    /// Genre label
    #[builder(default)]
    #[serde(default)]
    genre: Option<String>,
    /// Initial world-setting
    #[builder(default)]
    #[serde(default)]
    world_setting: StoryMap,
    /// Writing rules
    #[builder(default)]
    #[serde(default)]
    rules: StoryMap,
    /// Initial summary, usually empty
    #[builder(default)]
    #[serde(default)]
    summary: Option<String>,
}

impl NewProject {
    /// Creates a new project builder.
    pub fn builder() -> NewProjectBuilder {
        NewProjectBuilder::default()
    }
}
