//! Integration tests for the participation request workflow.
//!
//! Covers the full request lifecycle: filing against published events,
//! owner confirmation and rejection under a participant limit, the
//! full-event cascade, and requester cancellation.

mod common;

use crate::common::{seed_category, seed_published_event, seed_user, EventSeed, TestHarness};
use futures::future::join_all;
use server_core::common::DomainError;
use server_core::domains::events::actions::create_event;
use server_core::domains::events::models::NewEvent;
use server_core::domains::requests::actions::{
    cancel_request, confirm_request, create_request, decline_request, list_for_event,
    list_for_user,
};
use server_core::domains::requests::models::RequestStatus;

use chrono::{Duration, Utc};

// =============================================================================
// Filing requests
// =============================================================================

#[tokio::test]
async fn request_against_published_event_starts_pending() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let guest = seed_user("bob", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let request = create_request(guest.id, event.id, &harness.deps).await.unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.event_id, event.id);
    assert_eq!(request.user_id, guest.id);
}

#[tokio::test]
async fn request_is_confirmed_immediately_without_moderation() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let guest = seed_user("bob", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(
        owner.id,
        category.id,
        EventSeed {
            request_moderation: false,
            ..Default::default()
        },
        &harness,
    )
    .await;

    let request = create_request(guest.id, event.id, &harness.deps).await.unwrap();
    assert_eq!(request.status, RequestStatus::Confirmed);
}

#[tokio::test]
async fn unpublished_event_rejects_requests() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let guest = seed_user("bob", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = create_event(
        owner.id,
        NewEvent {
            category_id: category.id,
            title: "draft".to_string(),
            annotation: "draft".to_string(),
            description: "still pending moderation".to_string(),
            paid: false,
            event_date: Utc::now() + Duration::days(7),
            participant_limit: 0,
            request_moderation: true,
        },
        &harness.deps,
    )
    .await
    .unwrap();

    let result = create_request(guest.id, event.id, &harness.deps).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn second_request_for_the_same_event_is_a_conflict() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let guest = seed_user("bob", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    create_request(guest.id, event.id, &harness.deps).await.unwrap();

    let duplicate = create_request(guest.id, event.id, &harness.deps).await;
    assert!(matches!(duplicate, Err(DomainError::Conflict(_))));

    let requests = list_for_user(guest.id, &harness.deps).await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn canceled_request_still_blocks_a_new_one() {
    // Requests are never physically deleted, so the one-per-user-and-event
    // rule holds across cancellation
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let guest = seed_user("bob", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let request = create_request(guest.id, event.id, &harness.deps).await.unwrap();
    cancel_request(guest.id, request.id, &harness.deps).await.unwrap();

    let again = create_request(guest.id, event.id, &harness.deps).await;
    assert!(matches!(again, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn owner_cannot_request_own_event() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let result = create_request(owner.id, event.id, &harness.deps).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn full_event_rejects_new_requests_outright() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(
        owner.id,
        category.id,
        EventSeed {
            participant_limit: 1,
            request_moderation: false,
            ..Default::default()
        },
        &harness,
    )
    .await;

    let first = seed_user("bob", &harness).await;
    create_request(first.id, event.id, &harness.deps).await.unwrap();

    let second = seed_user("carol", &harness).await;
    let result = create_request(second.id, event.id, &harness.deps).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

// =============================================================================
// Confirmation, rejection and the capacity cascade
// =============================================================================

#[tokio::test]
async fn confirming_the_last_slot_rejects_remaining_pending_requests() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(
        owner.id,
        category.id,
        EventSeed {
            participant_limit: 1,
            ..Default::default()
        },
        &harness,
    )
    .await;

    let bob = seed_user("bob", &harness).await;
    let carol = seed_user("carol", &harness).await;
    let winning = create_request(bob.id, event.id, &harness.deps).await.unwrap();
    let losing = create_request(carol.id, event.id, &harness.deps).await.unwrap();

    let confirmed = confirm_request(event.id, owner.id, winning.id, &harness.deps)
        .await
        .unwrap();
    assert_eq!(confirmed.status, RequestStatus::Confirmed);

    let requests = list_for_event(event.id, owner.id, &harness.deps).await.unwrap();
    let leftover = requests.iter().find(|r| r.id == losing.id).unwrap();
    assert_eq!(leftover.status, RequestStatus::Rejected);
}

#[tokio::test]
async fn confirmation_fails_when_the_event_is_already_full() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(
        owner.id,
        category.id,
        EventSeed {
            participant_limit: 1,
            request_moderation: false,
            ..Default::default()
        },
        &harness,
    )
    .await;

    // Without moderation the first request takes the only slot and the
    // cascade runs; a somehow still-pending request cannot be confirmed.
    let bob = seed_user("bob", &harness).await;
    create_request(bob.id, event.id, &harness.deps).await.unwrap();

    let requests = list_for_event(event.id, owner.id, &harness.deps).await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].status, RequestStatus::Confirmed);
}

#[tokio::test]
async fn only_pending_requests_can_be_confirmed_or_rejected() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let guest = seed_user("bob", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let request = create_request(guest.id, event.id, &harness.deps).await.unwrap();
    confirm_request(event.id, owner.id, request.id, &harness.deps)
        .await
        .unwrap();

    let again = confirm_request(event.id, owner.id, request.id, &harness.deps).await;
    assert!(matches!(again, Err(DomainError::Conflict(_))));

    let rejected = decline_request(event.id, owner.id, request.id, &harness.deps).await;
    assert!(matches!(rejected, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn request_for_a_different_event_cannot_be_moderated() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let guest = seed_user("bob", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let first = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;
    let second = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let request = create_request(guest.id, first.id, &harness.deps).await.unwrap();

    let result = confirm_request(second.id, owner.id, request.id, &harness.deps).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn strangers_cannot_list_or_moderate_requests() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let guest = seed_user("bob", &harness).await;
    let stranger = seed_user("mallory", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let request = create_request(guest.id, event.id, &harness.deps).await.unwrap();

    let listing = list_for_event(event.id, stranger.id, &harness.deps).await;
    assert!(matches!(listing, Err(DomainError::Forbidden(_))));

    let moderation = confirm_request(event.id, stranger.id, request.id, &harness.deps).await;
    assert!(matches!(moderation, Err(DomainError::Forbidden(_))));
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn requester_cancellation_is_idempotent() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let guest = seed_user("bob", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let request = create_request(guest.id, event.id, &harness.deps).await.unwrap();

    let canceled = cancel_request(guest.id, request.id, &harness.deps).await.unwrap();
    assert_eq!(canceled.status, RequestStatus::Canceled);

    let again = cancel_request(guest.id, request.id, &harness.deps).await.unwrap();
    assert_eq!(again.status, RequestStatus::Canceled);
}

#[tokio::test]
async fn confirmed_request_can_still_be_canceled_by_requester() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let guest = seed_user("bob", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let event = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    let request = create_request(guest.id, event.id, &harness.deps).await.unwrap();
    confirm_request(event.id, owner.id, request.id, &harness.deps)
        .await
        .unwrap();

    let canceled = cancel_request(guest.id, request.id, &harness.deps).await.unwrap();
    assert_eq!(canceled.status, RequestStatus::Canceled);
}

#[tokio::test]
async fn users_see_their_own_requests_across_events() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let guest = seed_user("bob", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let first = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;
    let second = seed_published_event(owner.id, category.id, EventSeed::default(), &harness).await;

    create_request(guest.id, first.id, &harness.deps).await.unwrap();
    create_request(guest.id, second.id, &harness.deps).await.unwrap();

    let requests = list_for_user(guest.id, &harness.deps).await.unwrap();
    assert_eq!(requests.len(), 2);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn concurrent_confirmations_never_overshoot_the_limit() {
    let harness = TestHarness::new();
    let owner = seed_user("alice", &harness).await;
    let category = seed_category("meetups", &harness).await;
    let limit = 3u32;
    let event = seed_published_event(
        owner.id,
        category.id,
        EventSeed {
            participant_limit: limit,
            ..Default::default()
        },
        &harness,
    )
    .await;

    let mut request_ids = Vec::new();
    for i in 0..10 {
        let guest = seed_user(&format!("guest{i}"), &harness).await;
        let request = create_request(guest.id, event.id, &harness.deps).await.unwrap();
        request_ids.push(request.id);
    }

    let outcomes = join_all(request_ids.iter().map(|request_id| {
        let deps = harness.deps.clone();
        let request_id = *request_id;
        async move { confirm_request(event.id, owner.id, request_id, &deps).await }
    }))
    .await;

    let confirmed = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(confirmed as u32, limit);

    let requests = list_for_event(event.id, owner.id, &harness.deps).await.unwrap();
    let confirmed_stored = requests
        .iter()
        .filter(|r| r.status == RequestStatus::Confirmed)
        .count();
    let pending_stored = requests.iter().filter(|r| r.is_pending()).count();
    assert_eq!(confirmed_stored as u32, limit);
    assert_eq!(pending_stored, 0);
}
