//! Tests for folding accepted chapters into the story state.

mod test_utils;

use feuilleton_interface::ProjectRepository;
use feuilleton_narrative::{
    ContextBuilder, InMemoryStoryStore, SUMMARY_FALLBACK_CHARS, StateUpdater, Storyteller,
};
use serde_json::json;
use std::sync::Arc;
use test_utils::{MockStoryDriver, digest, seed_project};

async fn update_with(replies: Vec<String>) -> (feuilleton_core::Project, feuilleton_core::Project, MockStoryDriver) {
    let store = InMemoryStoryStore::new();
    let project = seed_project(&store).await;
    let driver = MockStoryDriver::with_texts(replies);
    let shared: Arc<InMemoryStoryStore> = Arc::new(store.clone());

    let context = ContextBuilder::new(shared.clone())
        .build(&project, 1, 3)
        .await
        .unwrap();
    let updater = StateUpdater::new(Storyteller::new(driver.clone()), shared);
    updater
        .update(&project, "The keeper lit the last lantern.", &context)
        .await
        .unwrap();

    let reloaded = store.get_project(*project.id()).await.unwrap().unwrap();
    (project, reloaded, driver)
}

#[tokio::test]
async fn test_structured_reply_replaces_summary_and_world() {
    let (_, updated, driver) = update_with(vec![digest(
        "The keeper lit the last lantern.",
        json!({"city": "Vell", "season": "spring", "lanterns": 12}),
    )])
    .await;

    assert_eq!(updated.summary().as_deref(), Some("The keeper lit the last lantern."));
    assert_eq!(updated.world_setting().get("lanterns"), Some(&json!(12)));
    assert_eq!(driver.call_count(), 1);
    assert!(driver.prompts()[0].contains("The keeper lit the last lantern."));
}

#[tokio::test]
async fn test_fenced_reply_is_accepted() {
    let reply = format!("```json\n{}\n```", digest("Fenced.", json!({"city": "Ost"})));
    let (_, updated, _) = update_with(vec![reply]).await;

    assert_eq!(updated.summary().as_deref(), Some("Fenced."));
    assert_eq!(updated.world_setting().get("city"), Some(&json!("Ost")));
}

#[tokio::test]
async fn test_unstructured_reply_falls_back_to_truncated_text() {
    let long_summary = "x".repeat(1500);
    let (original, updated, driver) =
        update_with(vec!["Sorry, here is prose instead.".to_string(), long_summary]).await;

    let summary = updated.summary().clone().unwrap();
    assert_eq!(summary.chars().count(), SUMMARY_FALLBACK_CHARS);
    assert_eq!(updated.world_setting(), original.world_setting());
    assert_eq!(driver.call_count(), 2);
}

#[tokio::test]
async fn test_missing_summary_field_falls_back() {
    let (original, updated, _) = update_with(vec![
        json!({"updated_settings": {"city": "Gone"}}).to_string(),
        "A short free-text summary.".to_string(),
    ])
    .await;

    assert_eq!(updated.summary().as_deref(), Some("A short free-text summary."));
    assert_eq!(updated.world_setting(), original.world_setting());
}

#[tokio::test]
async fn test_non_object_settings_are_kept_alongside_world() {
    let (original, updated, _) = update_with(vec![digest(
        "Snow fell.",
        json!("The river froze over."),
    )])
    .await;

    assert_eq!(updated.world_setting().get("city"), original.world_setting().get("city"));
    assert_eq!(
        updated.world_setting().get("latest_update"),
        Some(&json!("The river froze over."))
    );
}

#[tokio::test]
async fn test_truncation_counts_characters_not_bytes() {
    let long_summary = "é".repeat(1200);
    let (_, updated, _) = update_with(vec!["{}".to_string(), long_summary]).await;
    assert_eq!(updated.summary().clone().unwrap().chars().count(), 1000);
}
