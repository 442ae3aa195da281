//! Prompt templates.
//!
//! Templates use `{name}` placeholders filled in by the prompt renderer.
//! Braces that do not name a known variable, such as the JSON example in the
//! review template, pass through untouched.

use serde::{Deserialize, Serialize};

const DEFAULT_PLAN: &str = r#"You are the head writer of a serialized web novel.
Plan chapter {chapter_num}.

[World]
{world}

[Rules]
{rules_json}

[Story so far]
{summary}

Produce a four-beat outline for this chapter: setup, development, turn, cliffhanger.
Stay consistent with the world and the story so far."#;

const DEFAULT_WRITE: &str = r#"You are a professional web-novel author.
Write the full text of chapter {chapter_num} following the outline below.

[Outline]
{plot}

[Previous chapters]
{context}

[World]
{world}

[Rules]
{rules_json}

Requirements:
- Favour dialogue and concrete action over exposition.
- Write at least 3000 characters.
- End on a hook that makes the reader want the next chapter.
Output only the chapter text."#;

const DEFAULT_REVIEW: &str = r#"You are a demanding web-novel editor. Score the chapter below from 0 to 100.

[Chapter]
{content}

Respond in JSON:
{
  "details": {"readability": 0, "hook": 0, "consistency": 0},
  "score": 0,
  "reason": "why this score",
  "feedback": "concrete revision instructions"
}"#;

const DEFAULT_SUMMARIZE: &str = r#"Update the running story state after the chapter below.

[Story so far]
{summary}

[World]
{world}

[New chapter]
{content}

Respond in JSON with two fields:
"summary": the full story summary including this chapter, at most 1000 characters.
"updated_settings": the complete world-setting object with this chapter's changes applied."#;

/// The four templates a project generates with.
///
/// # Examples
///
/// ```
/// use feuilleton_core::PromptTemplates;
///
/// let templates = PromptTemplates::default();
/// assert!(templates.plan().contains("{chapter_num}"));
/// assert!(templates.review().contains("{content}"));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_", into)]
pub struct PromptTemplates {
    /// Outline a chapter
    plan: String,
    /// Write a chapter from the outline
    write: String,
    /// Score a candidate chapter as JSON
    review: String,
    /// Fold an accepted chapter into summary and world-setting, as JSON
    summarize: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            plan: DEFAULT_PLAN.to_string(),
            write: DEFAULT_WRITE.to_string(),
            review: DEFAULT_REVIEW.to_string(),
            summarize: DEFAULT_SUMMARIZE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Assembles a template set from stored parts.
    pub fn new(
        plan: impl Into<String>,
        write: impl Into<String>,
        review: impl Into<String>,
        summarize: impl Into<String>,
    ) -> Self {
        Self {
            plan: plan.into(),
            write: write.into(),
            review: review.into(),
            summarize: summarize.into(),
        }
    }

    /// Returns the template for one stage.
    pub fn get(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::Plan => &self.plan,
            PromptKind::Write => &self.write,
            PromptKind::Review => &self.review,
            PromptKind::Summarize => &self.summarize,
        }
    }

    /// Applies a partial update, leaving absent fields as they are.
    pub fn apply(&mut self, update: &PromptTemplatesUpdate) {
        if let Some(plan) = &update.plan {
            self.plan = plan.clone();
        }
        if let Some(write) = &update.write {
            self.write = write.clone();
        }
        if let Some(review) = &update.review {
            self.review = review.clone();
        }
        if let Some(summarize) = &update.summarize {
            self.summarize = summarize.clone();
        }
    }
}

/// Generation stage a template belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// Chapter outline
    Plan,
    /// Chapter body
    Write,
    /// Self-review
    Review,
    /// Summary and world update
    Summarize,
}

/// Partial edit of a template set.
///
/// # Examples
///
/// ```
/// use feuilleton_core::{PromptTemplates, PromptTemplatesUpdate};
///
/// let mut templates = PromptTemplates::default();
/// let update = PromptTemplatesUpdate::default().with_plan("Outline chapter {chapter_num}.");
/// templates.apply(&update);
///
/// assert_eq!(templates.plan(), "Outline chapter {chapter_num}.");
/// assert_eq!(templates.write(), PromptTemplates::default().write());
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_", into, strip_option)]
pub struct PromptTemplatesUpdate {
    /// Replacement plan template
    #[serde(default)]
    plan: Option<String>,
    /// Replacement write template
    #[serde(default)]
    write: Option<String>,
    /// Replacement review template
    #[serde(default)]
    review: Option<String>,
    /// Replacement summarize template
    #[serde(default)]
    summarize: Option<String>,
}

impl PromptTemplatesUpdate {
    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.plan.is_none()
            && self.write.is_none()
            && self.review.is_none()
            && self.summarize.is_none()
    }

    /// Sets the template for one stage.
    pub fn with_kind(self, kind: PromptKind, template: impl Into<String>) -> Self {
        match kind {
            PromptKind::Plan => self.with_plan(template),
            PromptKind::Write => self.with_write(template),
            PromptKind::Review => self.with_review(template),
            PromptKind::Summarize => self.with_summarize(template),
        }
    }
}
