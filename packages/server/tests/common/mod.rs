//! Shared test fixtures.
//!
//! Tests run fully in memory against the same actions the HTTP handlers
//! call; seeding goes through the actions too so every fixture obeys the
//! same rules as production traffic.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};

use server_core::common::{CategoryId, UserId};
use server_core::domains::categories::actions::create_category;
use server_core::domains::categories::models::{Category, NewCategory};
use server_core::domains::events::actions::{create_event, publish_event};
use server_core::domains::events::models::{Event, NewEvent};
use server_core::domains::users::actions::create_user;
use server_core::domains::users::models::{NewUser, User};
use server_core::kernel::test_dependencies::{test_deps, MockStatisticsService};
use server_core::kernel::ServerDeps;

pub struct TestHarness {
    pub deps: ServerDeps,
    pub statistics: Arc<MockStatisticsService>,
}

impl TestHarness {
    pub fn new() -> Self {
        let (deps, statistics) = test_deps();
        Self { deps, statistics }
    }
}

pub async fn seed_user(name: &str, harness: &TestHarness) -> User {
    create_user(
        NewUser {
            name: name.to_string(),
            email: format!("{name}@example.org"),
        },
        &harness.deps,
    )
    .await
    .expect("Failed to create user")
}

pub async fn seed_category(name: &str, harness: &TestHarness) -> Category {
    create_category(NewCategory { name: name.to_string() }, &harness.deps)
        .await
        .expect("Failed to create category")
}

/// Event seed; defaults to unlimited capacity with moderation on.
pub struct EventSeed {
    pub participant_limit: u32,
    pub request_moderation: bool,
}

impl Default for EventSeed {
    fn default() -> Self {
        Self {
            participant_limit: 0,
            request_moderation: true,
        }
    }
}

pub async fn seed_pending_event(
    owner_id: UserId,
    category_id: CategoryId,
    seed: EventSeed,
    harness: &TestHarness,
) -> Event {
    create_event(
        owner_id,
        NewEvent {
            category_id,
            title: "Rust meetup".to_string(),
            annotation: "monthly meetup".to_string(),
            description: "talks and pizza".to_string(),
            paid: false,
            event_date: Utc::now() + Duration::days(7),
            participant_limit: seed.participant_limit,
            request_moderation: seed.request_moderation,
        },
        &harness.deps,
    )
    .await
    .expect("Failed to create event")
}

pub async fn seed_published_event(
    owner_id: UserId,
    category_id: CategoryId,
    seed: EventSeed,
    harness: &TestHarness,
) -> Event {
    let event = seed_pending_event(owner_id, category_id, seed, harness).await;
    publish_event(event.id, &harness.deps)
        .await
        .expect("Failed to publish event")
}
