// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. State-machine
// rules and capacity decisions live in domain actions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEventStore)

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

use crate::common::{CategoryId, CompilationId, EventId, RequestId, SubscriptionId, UserId};
use crate::domains::categories::models::Category;
use crate::domains::compilations::models::Compilation;
use crate::domains::events::models::{Event, EventFilters, Window};
use crate::domains::requests::models::Request;
use crate::domains::subscriptions::models::Subscription;
use crate::domains::users::models::User;

// =============================================================================
// Event storage
// =============================================================================

#[async_trait]
pub trait BaseEventStore: Send + Sync {
    async fn insert(&self, event: Event) -> Result<Event>;

    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>>;

    /// Commits the given aggregate state over the stored one. Mutations are
    /// explicit: nothing is persisted until the action calls `update`.
    async fn update(&self, event: Event) -> Result<Event>;

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Event>>;

    /// Filtered search ordered by event date.
    async fn search(&self, filters: &EventFilters, window: Window) -> Result<Vec<Event>>;
}

// =============================================================================
// Request storage
// =============================================================================

#[async_trait]
pub trait BaseRequestStore: Send + Sync {
    async fn insert(&self, request: Request) -> Result<Request>;

    async fn find_by_id(&self, id: RequestId) -> Result<Option<Request>>;

    /// Commits the given aggregate state over the stored one.
    async fn update(&self, request: Request) -> Result<Request>;

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Request>>;

    async fn find_by_event(&self, event_id: EventId) -> Result<Vec<Request>>;

    /// Number of requests for the event currently in status Confirmed.
    async fn confirmed_count(&self, event_id: EventId) -> Result<u64>;

    /// Transitions every Pending request of the event to Rejected and
    /// returns how many were affected (the capacity cascade).
    async fn reject_pending(&self, event_id: EventId) -> Result<u64>;
}

// =============================================================================
// Reference data storage
// =============================================================================

#[async_trait]
pub trait BaseUserStore: Send + Sync {
    async fn insert(&self, user: User) -> Result<User>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;
}

#[async_trait]
pub trait BaseCategoryStore: Send + Sync {
    async fn insert(&self, category: Category) -> Result<Category>;

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>>;
}

#[async_trait]
pub trait BaseSubscriptionStore: Send + Sync {
    async fn insert(&self, subscription: Subscription) -> Result<Subscription>;

    async fn find_by_id(&self, id: SubscriptionId) -> Result<Option<Subscription>>;

    async fn delete(&self, id: SubscriptionId) -> Result<()>;

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Subscription>>;
}

#[async_trait]
pub trait BaseCompilationStore: Send + Sync {
    async fn insert(&self, compilation: Compilation) -> Result<Compilation>;

    async fn find_by_id(&self, id: CompilationId) -> Result<Option<Compilation>>;

    /// Commits the given aggregate state over the stored one, member event
    /// list included.
    async fn update(&self, compilation: Compilation) -> Result<Compilation>;

    async fn delete(&self, id: CompilationId) -> Result<()>;

    /// Listing, optionally restricted by pinned flag.
    async fn find(&self, pinned: Option<bool>, window: Window) -> Result<Vec<Compilation>>;
}

// =============================================================================
// Statistics Service Trait (Infrastructure - external collaborator)
// =============================================================================

#[async_trait]
pub trait BaseStatisticsService: Send + Sync {
    /// View counts for a set of events. Events the service has never seen
    /// are absent from the map; callers treat them as zero.
    async fn view_counts(&self, event_ids: &[EventId]) -> Result<HashMap<EventId, u64>>;

    /// View count for a single event.
    async fn view_count(&self, event_id: EventId) -> Result<u64> {
        // Default implementation goes through the batch call
        let counts = self.view_counts(std::slice::from_ref(&event_id)).await?;
        Ok(counts.get(&event_id).copied().unwrap_or(0))
    }
}
