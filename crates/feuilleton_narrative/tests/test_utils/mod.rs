//! Test utilities for the generation engine.
//!
//! Mock drivers that replay scripted replies, a store wrapper that injects
//! failures, and builders for common fixtures.

#![allow(dead_code)]

pub mod mock_driver;
pub mod mock_store;

pub use mock_driver::{MockResponse, MockStoryDriver};
pub use mock_store::FlakyStore;

use feuilleton_core::{NewChapter, NewProject, Project};
use feuilleton_interface::{ChapterRepository, ProjectRepository};
use feuilleton_narrative::InMemoryStoryStore;
use serde_json::json;

/// A chapter body long enough to be reviewed.
pub fn long_text(tag: &str) -> String {
    format!("[{tag}] ") + &"The lantern keeper climbed the tower again. ".repeat(15)
}

/// A chapter body too short to be reviewed.
pub fn short_text(tag: &str) -> String {
    format!("[{tag}] too short")
}

/// A review reply with the given score.
pub fn review(score: i32, feedback: &str) -> String {
    json!({
        "details": {"readability": score, "hook": score},
        "score": score,
        "reason": "scripted",
        "feedback": feedback,
    })
    .to_string()
}

/// A summarize reply.
pub fn digest(summary: &str, world: serde_json::Value) -> String {
    json!({"summary": summary, "updated_settings": world}).to_string()
}

/// Create a project with default templates.
pub async fn seed_project(store: &InMemoryStoryStore) -> Project {
    let project = NewProject::builder()
        .title("The Lantern Keeper")
        .genre(Some("fantasy".to_string()))
        .world_setting(
            json!({"city": "Vell", "season": "winter"})
                .as_object()
                .cloned()
                .unwrap(),
        )
        .rules(json!({"pov": "third person"}).as_object().cloned().unwrap())
        .build()
        .unwrap();
    store
        .create_project(project, Default::default())
        .await
        .unwrap()
}

/// Store chapters numbered `1..=count` for a project.
pub async fn seed_chapters(store: &InMemoryStoryStore, project: &Project, count: i32) {
    for n in 1..=count {
        store
            .create_chapter(NewChapter::new(
                *project.id(),
                n,
                format!("Body of chapter {n}."),
                96,
                None,
            ))
            .await
            .unwrap();
    }
}
