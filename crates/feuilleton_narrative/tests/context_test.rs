//! Tests for template variable assembly.

mod test_utils;

use feuilleton_core::NewProject;
use feuilleton_interface::ProjectRepository;
use feuilleton_narrative::{ContextBuilder, EMPTY_SUMMARY, InMemoryStoryStore};
use serde_json::json;
use std::sync::Arc;
use test_utils::{seed_chapters, seed_project};

#[tokio::test]
async fn test_reserved_keys() {
    let store = InMemoryStoryStore::new();
    let project = seed_project(&store).await;
    let context = ContextBuilder::new(Arc::new(store.clone()))
        .build(&project, 1, 3)
        .await
        .unwrap();

    assert_eq!(context.get("chapter_num"), Some(&json!(1)));
    assert_eq!(context.get_text("title").as_deref(), Some("The Lantern Keeper"));
    assert_eq!(context.get_text("genre").as_deref(), Some("fantasy"));
    assert_eq!(context.get_text("summary").as_deref(), Some(EMPTY_SUMMARY));
    assert_eq!(context.get_text("context").as_deref(), Some(""));
    assert_eq!(
        context.get_text("rules_json").as_deref(),
        Some(r#"{"pov":"third person"}"#)
    );
    // flattened rule key
    assert_eq!(context.get_text("pov").as_deref(), Some("third person"));
}

#[tokio::test]
async fn test_world_json_is_inserted_literally() {
    let store = InMemoryStoryStore::new();
    let project = store
        .create_project(
            NewProject::builder()
                .title("Literal")
                .world_setting(json!({"a": 1}).as_object().cloned().unwrap())
                .build()
                .unwrap(),
            Default::default(),
        )
        .await
        .unwrap();
    let context = ContextBuilder::new(Arc::new(store.clone()))
        .build(&project, 1, 3)
        .await
        .unwrap();

    assert_eq!(context.render("World: {world}"), r#"World: {"a":1}"#);
}

#[tokio::test]
async fn test_rule_keys_override_reserved_keys() {
    let store = InMemoryStoryStore::new();
    let project = store
        .create_project(
            NewProject::builder()
                .title("Collision")
                .summary(Some("the real summary".to_string()))
                .rules(json!({"summary": "from the rules"}).as_object().cloned().unwrap())
                .build()
                .unwrap(),
            Default::default(),
        )
        .await
        .unwrap();
    let context = ContextBuilder::new(Arc::new(store.clone()))
        .build(&project, 1, 3)
        .await
        .unwrap();

    assert_eq!(context.get_text("summary").as_deref(), Some("from the rules"));
}

#[tokio::test]
async fn test_window_takes_latest_chapters_in_order() {
    let store = InMemoryStoryStore::new();
    let project = seed_project(&store).await;
    seed_chapters(&store, &project, 5).await;
    let context = ContextBuilder::new(Arc::new(store.clone()))
        .build(&project, 6, 2)
        .await
        .unwrap();

    assert_eq!(
        context.get_text("context").as_deref(),
        Some("\n[Chapter 4]\nBody of chapter 4.\n\n[Chapter 5]\nBody of chapter 5.\n")
    );
}

#[tokio::test]
async fn test_zero_window_reads_no_chapters() {
    let store = InMemoryStoryStore::new();
    let project = seed_project(&store).await;
    seed_chapters(&store, &project, 2).await;
    let context = ContextBuilder::new(Arc::new(store.clone()))
        .build(&project, 3, 0)
        .await
        .unwrap();

    assert_eq!(context.get_text("context").as_deref(), Some(""));
}
