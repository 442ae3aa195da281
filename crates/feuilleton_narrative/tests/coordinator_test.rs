//! Tests for run admission and slot release.

mod test_utils;

use feuilleton_core::GenerationConfig;
use feuilleton_error::{FeuilletonErrorKind, GenerationErrorKind};
use feuilleton_interface::ChapterRepository;
use feuilleton_narrative::{InMemoryStoryStore, RunCoordinator, RunRegistry};
use serde_json::json;
use std::sync::Arc;
use test_utils::{
    FlakyStore, MockResponse, MockStoryDriver, digest, long_text, review, seed_project,
};
use tokio::sync::Semaphore;

fn accepted_script() -> Vec<String> {
    vec![
        "outline".to_string(),
        long_text("1"),
        review(99, "done"),
        digest("One chapter in.", json!({"city": "Vell"})),
    ]
}

#[tokio::test]
async fn test_second_start_is_rejected_without_touching_the_store() {
    let store = FlakyStore::new(InMemoryStoryStore::new());
    let project = seed_project(&store.inner).await;
    let gate = Arc::new(Semaphore::new(0));
    let driver = MockStoryDriver::with_texts(accepted_script()).gated(gate.clone());
    let coordinator = RunCoordinator::new(driver, Arc::new(store.clone()));

    let handle = coordinator
        .start(*project.id(), GenerationConfig::default())
        .await
        .unwrap();
    assert!(coordinator.is_running(*project.id()));
    let lookups = store.project_lookups();

    let err = coordinator
        .start(*project.id(), GenerationConfig::default())
        .await
        .unwrap_err();
    assert_eq!(
        err.generation_kind(),
        Some(&GenerationErrorKind::AlreadyRunning(*project.id()))
    );
    assert_eq!(store.project_lookups(), lookups);

    gate.add_permits(100);
    let outcome = handle.wait().await.unwrap();
    assert!(outcome.is_accepted());
    assert!(!coordinator.is_running(*project.id()));
}

#[tokio::test]
async fn test_unknown_project_is_rejected_and_released() {
    let store = InMemoryStoryStore::new();
    let driver = MockStoryDriver::with_texts(Vec::<String>::new());
    let coordinator = RunCoordinator::new(driver.clone(), Arc::new(store));

    let err = coordinator
        .start(404, GenerationConfig::default())
        .await
        .unwrap_err();
    assert_eq!(
        err.generation_kind(),
        Some(&GenerationErrorKind::ProjectNotFound(404))
    );
    assert!(!coordinator.is_running(404));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let store = InMemoryStoryStore::new();
    let project = seed_project(&store).await;
    let coordinator =
        RunCoordinator::new(MockStoryDriver::with_texts(Vec::<String>::new()), Arc::new(store));

    let err = coordinator
        .start(*project.id(), GenerationConfig::default().with_max_attempts(21))
        .await
        .unwrap_err();
    assert!(matches!(
        err.generation_kind(),
        Some(GenerationErrorKind::InvalidConfig(_))
    ));
    assert!(!coordinator.is_running(*project.id()));
}

#[tokio::test]
async fn test_slot_released_after_threshold_failure() {
    let store = InMemoryStoryStore::new();
    let project = seed_project(&store).await;
    let driver = MockStoryDriver::with_texts([
        "outline".to_string(),
        long_text("1"),
        review(10, "no"),
        "outline again".to_string(),
        long_text("2"),
        review(99, "yes"),
        digest("Second try.", json!({})),
    ]);
    let coordinator = RunCoordinator::new(driver, Arc::new(store.clone()));
    let config = GenerationConfig::default().with_max_attempts(1);

    let first = coordinator.start(*project.id(), config).await.unwrap();
    assert!(!first.wait().await.unwrap().is_accepted());
    assert!(!coordinator.is_running(*project.id()));

    let second = coordinator.start(*project.id(), config).await.unwrap();
    assert!(second.wait().await.unwrap().is_accepted());
    assert_eq!(store.list_chapters(*project.id()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_slot_released_after_store_failure() {
    let store = FlakyStore::new(InMemoryStoryStore::new());
    let project = seed_project(&store.inner).await;
    store.fail_appends();
    let driver = MockStoryDriver::with_texts(accepted_script());
    let coordinator = RunCoordinator::new(driver, Arc::new(store.clone()));

    let handle = coordinator
        .start(*project.id(), GenerationConfig::default())
        .await
        .unwrap();
    let err = handle.wait().await.unwrap_err();
    assert!(matches!(err.kind(), FeuilletonErrorKind::Storage(_)));
    assert!(!coordinator.is_running(*project.id()));
    assert!(store.inner.list_chapters(*project.id()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_slot_released_after_panic() {
    let store = InMemoryStoryStore::new();
    let project = seed_project(&store).await;
    let driver = MockStoryDriver::new_sequence([MockResponse::Panic]);
    let coordinator = RunCoordinator::new(driver, Arc::new(store));

    let handle = coordinator
        .start(*project.id(), GenerationConfig::default())
        .await
        .unwrap();
    let err = handle.wait().await.unwrap_err();
    assert!(matches!(
        err.generation_kind(),
        Some(GenerationErrorKind::RunAborted(_))
    ));
    assert!(!coordinator.is_running(*project.id()));
}

#[tokio::test]
async fn test_distinct_projects_run_side_by_side() {
    let store = InMemoryStoryStore::new();
    let first = seed_project(&store).await;
    let second = seed_project(&store).await;
    let gate = Arc::new(Semaphore::new(0));
    let registry = RunRegistry::new();

    let a = RunCoordinator::with_registry(
        MockStoryDriver::with_texts(accepted_script()).gated(gate.clone()),
        Arc::new(store.clone()),
        registry.clone(),
    );
    let b = RunCoordinator::with_registry(
        MockStoryDriver::with_texts(accepted_script()).gated(gate.clone()),
        Arc::new(store.clone()),
        registry.clone(),
    );

    let ha = a.start(*first.id(), GenerationConfig::default()).await.unwrap();
    let hb = b.start(*second.id(), GenerationConfig::default()).await.unwrap();
    assert_eq!(registry.active(), vec![*first.id(), *second.id()]);

    // a shared registry also excludes across coordinators
    assert!(b.start(*first.id(), GenerationConfig::default()).await.is_err());

    gate.add_permits(100);
    assert!(ha.wait().await.unwrap().is_accepted());
    assert!(hb.wait().await.unwrap().is_accepted());
    assert!(registry.active().is_empty());
}

#[test]
fn test_guard_releases_on_drop() {
    let registry = RunRegistry::new();
    let guard = registry.try_claim(7).unwrap();
    assert!(registry.try_claim(7).is_none());
    assert_eq!(guard.project_id(), 7);
    drop(guard);
    assert!(!registry.is_running(7));
    assert!(registry.try_claim(7).is_some());
}
