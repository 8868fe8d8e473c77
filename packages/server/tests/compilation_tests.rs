//! Integration tests for curated event compilations.
//!
//! Compilations are admin-curated event selections; reads expand the
//! member events into enriched summaries, and the public listing can be
//! restricted to pinned compilations.

mod common;

use crate::common::{seed_category, seed_published_event, seed_user, EventSeed, TestHarness};
use server_core::common::{DomainError, EventId};
use server_core::domains::compilations::actions::{
    add_event, compilation_details, create_compilation, delete_compilation, list_compilations,
    remove_event, set_pinned,
};
use server_core::domains::compilations::models::NewCompilation;
use server_core::domains::events::models::Window;

fn draft(title: &str, pinned: bool, event_ids: Vec<EventId>) -> NewCompilation {
    NewCompilation {
        title: title.to_string(),
        pinned,
        event_ids,
    }
}

#[tokio::test]
async fn compilations_are_created_with_their_events() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let compilation = create_compilation(draft("summer picks", false, vec![event.id]), &harness.deps)
        .await
        .unwrap();

    assert_eq!(compilation.title, "summer picks");
    assert!(!compilation.pinned);
    assert_eq!(compilation.event_ids, vec![event.id]);
}

#[tokio::test]
async fn creating_a_compilation_with_a_missing_event_is_not_found() {
    let harness = TestHarness::new();

    let result = create_compilation(draft("ghosts", false, vec![EventId::new()]), &harness.deps).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn events_can_be_added_and_removed() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let compilation = create_compilation(draft("picks", false, vec![]), &harness.deps)
        .await
        .unwrap();

    let compilation = add_event(compilation.id, event.id, &harness.deps).await.unwrap();
    assert_eq!(compilation.event_ids, vec![event.id]);

    let compilation = remove_event(compilation.id, event.id, &harness.deps).await.unwrap();
    assert!(compilation.event_ids.is_empty());
}

#[tokio::test]
async fn adding_an_event_twice_is_a_conflict() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let compilation = create_compilation(draft("picks", false, vec![event.id]), &harness.deps)
        .await
        .unwrap();

    let result = add_event(compilation.id, event.id, &harness.deps).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn removing_an_absent_event_is_not_found() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let compilation = create_compilation(draft("picks", false, vec![]), &harness.deps)
        .await
        .unwrap();

    let result = remove_event(compilation.id, event.id, &harness.deps).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn pinning_and_unpinning_toggle_the_flag() {
    let harness = TestHarness::new();

    let compilation = create_compilation(draft("picks", false, vec![]), &harness.deps)
        .await
        .unwrap();

    let compilation = set_pinned(compilation.id, true, &harness.deps).await.unwrap();
    assert!(compilation.pinned);

    let compilation = set_pinned(compilation.id, false, &harness.deps).await.unwrap();
    assert!(!compilation.pinned);
}

#[tokio::test]
async fn listing_can_be_restricted_to_pinned_compilations() {
    let harness = TestHarness::new();

    create_compilation(draft("front page", true, vec![]), &harness.deps)
        .await
        .unwrap();
    create_compilation(draft("archive", false, vec![]), &harness.deps)
        .await
        .unwrap();

    let all = list_compilations(None, Window::default(), &harness.deps).await.unwrap();
    assert_eq!(all.len(), 2);

    let pinned = list_compilations(Some(true), Window::default(), &harness.deps)
        .await
        .unwrap();
    assert_eq!(pinned.len(), 1);
    assert_eq!(pinned[0].title, "front page");
}

#[tokio::test]
async fn deleted_compilations_disappear_from_reads() {
    let harness = TestHarness::new();

    let compilation = create_compilation(draft("picks", false, vec![]), &harness.deps)
        .await
        .unwrap();
    delete_compilation(compilation.id, &harness.deps).await.unwrap();

    let result = compilation_details(compilation.id, &harness.deps).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
    assert!(list_compilations(None, Window::default(), &harness.deps)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn compilation_reads_expand_and_enrich_member_events() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;
    harness.statistics.set_count(event.id, 7);

    let compilation = create_compilation(draft("picks", true, vec![event.id]), &harness.deps)
        .await
        .unwrap();

    let details = compilation_details(compilation.id, &harness.deps).await.unwrap();
    assert_eq!(details.events.len(), 1);
    assert_eq!(details.events[0].id, event.id);
    assert_eq!(details.events[0].views, 7);
}
