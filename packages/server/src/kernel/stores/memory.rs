//! In-memory store implementations.
//!
//! Backs tests and DATABASE_URL-less deployments. Each store is a
//! RwLock-protected map; semantics mirror the Postgres implementations.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::common::{CategoryId, CompilationId, EventId, RequestId, SubscriptionId, UserId};
use crate::domains::categories::models::Category;
use crate::domains::compilations::models::Compilation;
use crate::domains::events::models::{Event, EventFilters, Window};
use crate::domains::requests::models::{Request, RequestStatus};
use crate::domains::subscriptions::models::Subscription;
use crate::domains::users::models::User;
use crate::kernel::{
    BaseCategoryStore, BaseCompilationStore, BaseEventStore, BaseRequestStore,
    BaseSubscriptionStore, BaseUserStore,
};

// =============================================================================
// Events
// =============================================================================

#[derive(Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<EventId, Event>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseEventStore for InMemoryEventStore {
    async fn insert(&self, event: Event) -> Result<Event> {
        self.events.write().await.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn update(&self, event: Event) -> Result<Event> {
        self.events.write().await.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .events
            .read()
            .await
            .values()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.event_date);
        Ok(events)
    }

    async fn search(&self, filters: &EventFilters, window: Window) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .events
            .read()
            .await
            .values()
            .filter(|e| filters.matches(e))
            .cloned()
            .collect();
        events.sort_by_key(|e| e.event_date);
        Ok(events.into_iter().skip(window.from).take(window.size).collect())
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Default)]
pub struct InMemoryRequestStore {
    requests: RwLock<HashMap<RequestId, Request>>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRequestStore for InMemoryRequestStore {
    async fn insert(&self, request: Request) -> Result<Request> {
        let mut requests = self.requests.write().await;
        // Same uniqueness rule the database schema enforces
        if requests
            .values()
            .any(|r| r.user_id == request.user_id && r.event_id == request.event_id)
        {
            anyhow::bail!(
                "duplicate request for user {} and event {}",
                request.user_id,
                request.event_id
            );
        }
        requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: RequestId) -> Result<Option<Request>> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn update(&self, request: Request) -> Result<Request> {
        self.requests.write().await.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Request>> {
        let mut requests: Vec<Request> = self
            .requests
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        requests.sort_by_key(|r| r.created);
        Ok(requests)
    }

    async fn find_by_event(&self, event_id: EventId) -> Result<Vec<Request>> {
        let mut requests: Vec<Request> = self
            .requests
            .read()
            .await
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        requests.sort_by_key(|r| r.created);
        Ok(requests)
    }

    async fn confirmed_count(&self, event_id: EventId) -> Result<u64> {
        let count = self
            .requests
            .read()
            .await
            .values()
            .filter(|r| r.event_id == event_id && r.status == RequestStatus::Confirmed)
            .count();
        Ok(count as u64)
    }

    async fn reject_pending(&self, event_id: EventId) -> Result<u64> {
        let mut requests = self.requests.write().await;
        let mut affected = 0;
        for request in requests.values_mut() {
            if request.event_id == event_id && request.status == RequestStatus::Pending {
                request.status = RequestStatus::Rejected;
                affected += 1;
            }
        }
        Ok(affected)
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseUserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> Result<User> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Default)]
pub struct InMemoryCategoryStore {
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseCategoryStore for InMemoryCategoryStore {
    async fn insert(&self, category: Category) -> Result<Category> {
        self.categories.write().await.insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }
}

// =============================================================================
// Compilations
// =============================================================================

#[derive(Default)]
pub struct InMemoryCompilationStore {
    compilations: RwLock<HashMap<CompilationId, Compilation>>,
}

impl InMemoryCompilationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseCompilationStore for InMemoryCompilationStore {
    async fn insert(&self, compilation: Compilation) -> Result<Compilation> {
        self.compilations
            .write()
            .await
            .insert(compilation.id, compilation.clone());
        Ok(compilation)
    }

    async fn find_by_id(&self, id: CompilationId) -> Result<Option<Compilation>> {
        Ok(self.compilations.read().await.get(&id).cloned())
    }

    async fn update(&self, compilation: Compilation) -> Result<Compilation> {
        self.compilations
            .write()
            .await
            .insert(compilation.id, compilation.clone());
        Ok(compilation)
    }

    async fn delete(&self, id: CompilationId) -> Result<()> {
        self.compilations.write().await.remove(&id);
        Ok(())
    }

    async fn find(&self, pinned: Option<bool>, window: Window) -> Result<Vec<Compilation>> {
        let mut compilations: Vec<Compilation> = self
            .compilations
            .read()
            .await
            .values()
            .filter(|c| pinned.map_or(true, |p| c.pinned == p))
            .cloned()
            .collect();
        compilations.sort_by_key(|c| c.id);
        Ok(compilations
            .into_iter()
            .skip(window.from)
            .take(window.size)
            .collect())
    }
}

// =============================================================================
// Subscriptions
// =============================================================================

#[derive(Default)]
pub struct InMemorySubscriptionStore {
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseSubscriptionStore for InMemorySubscriptionStore {
    async fn insert(&self, subscription: Subscription) -> Result<Subscription> {
        let mut subscriptions = self.subscriptions.write().await;
        // Same uniqueness rule the database schema enforces
        if subscriptions
            .values()
            .any(|s| s.user_id == subscription.user_id && s.friend_id == subscription.friend_id)
        {
            anyhow::bail!(
                "duplicate subscription for user {} and friend {}",
                subscription.user_id,
                subscription.friend_id
            );
        }
        subscriptions.insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn find_by_id(&self, id: SubscriptionId) -> Result<Option<Subscription>> {
        Ok(self.subscriptions.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: SubscriptionId) -> Result<()> {
        self.subscriptions.write().await.remove(&id);
        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Subscription>> {
        let mut subscriptions: Vec<Subscription> = self
            .subscriptions
            .read()
            .await
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        subscriptions.sort_by_key(|s| s.created_at);
        Ok(subscriptions)
    }
}
