//! Server dependencies for effects (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! actions. Storage and the statistics collaborator sit behind trait
//! abstractions so tests run fully in memory.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use stats_client::StatsClient;

use crate::common::EventId;
use crate::domains::requests::capacity::CapacityGuard;
use crate::kernel::stores::memory::{
    InMemoryCategoryStore, InMemoryCompilationStore, InMemoryEventStore, InMemoryRequestStore,
    InMemorySubscriptionStore, InMemoryUserStore,
};
use crate::kernel::stores::postgres::{
    PgCategoryStore, PgCompilationStore, PgEventStore, PgRequestStore, PgSubscriptionStore,
    PgUserStore,
};
use crate::kernel::{
    BaseCategoryStore, BaseCompilationStore, BaseEventStore, BaseRequestStore,
    BaseStatisticsService, BaseSubscriptionStore, BaseUserStore,
};

// =============================================================================
// StatsClient Adapter (implements BaseStatisticsService trait)
// =============================================================================

/// Wrapper around the statistics HTTP client that implements
/// BaseStatisticsService. The statistics service keys hits by request URI,
/// so event ids are mapped to `/events/{id}` and back.
pub struct StatsAdapter(pub Arc<StatsClient>);

impl StatsAdapter {
    pub fn new(client: Arc<StatsClient>) -> Self {
        Self(client)
    }
}

fn event_uri(event_id: EventId) -> String {
    format!("/events/{event_id}")
}

fn event_id_from_uri(uri: &str) -> Option<EventId> {
    let raw = uri.strip_prefix("/events/")?;
    EventId::from_str(raw).ok()
}

#[async_trait]
impl BaseStatisticsService for StatsAdapter {
    async fn view_counts(&self, event_ids: &[EventId]) -> Result<HashMap<EventId, u64>> {
        let uris: Vec<String> = event_ids.iter().copied().map(event_uri).collect();
        let stats = self
            .0
            .hit_counts(&uris)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        let mut counts = HashMap::new();
        for entry in stats {
            if let Some(event_id) = event_id_from_uri(&entry.uri) {
                counts.insert(event_id, entry.hits);
            }
        }
        Ok(counts)
    }
}

/// Statistics backend for deployments without a statistics server
/// configured; every event reads as zero views.
pub struct NoopStatisticsService;

#[async_trait]
impl BaseStatisticsService for NoopStatisticsService {
    async fn view_counts(&self, _event_ids: &[EventId]) -> Result<HashMap<EventId, u64>> {
        Ok(HashMap::new())
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub events: Arc<dyn BaseEventStore>,
    pub requests: Arc<dyn BaseRequestStore>,
    pub users: Arc<dyn BaseUserStore>,
    pub categories: Arc<dyn BaseCategoryStore>,
    pub subscriptions: Arc<dyn BaseSubscriptionStore>,
    pub compilations: Arc<dyn BaseCompilationStore>,
    pub statistics: Arc<dyn BaseStatisticsService>,
    /// Serializes capacity decisions per event.
    pub capacity: CapacityGuard,
}

impl ServerDeps {
    /// In-memory backend; used by tests and by deployments without a
    /// DATABASE_URL.
    pub fn in_memory(statistics: Arc<dyn BaseStatisticsService>) -> Self {
        Self {
            events: Arc::new(InMemoryEventStore::new()),
            requests: Arc::new(InMemoryRequestStore::new()),
            users: Arc::new(InMemoryUserStore::new()),
            categories: Arc::new(InMemoryCategoryStore::new()),
            subscriptions: Arc::new(InMemorySubscriptionStore::new()),
            compilations: Arc::new(InMemoryCompilationStore::new()),
            statistics,
            capacity: CapacityGuard::new(),
        }
    }

    /// Postgres backend.
    pub fn postgres(pool: PgPool, statistics: Arc<dyn BaseStatisticsService>) -> Self {
        Self {
            events: Arc::new(PgEventStore::new(pool.clone())),
            requests: Arc::new(PgRequestStore::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool.clone())),
            categories: Arc::new(PgCategoryStore::new(pool.clone())),
            subscriptions: Arc::new(PgSubscriptionStore::new(pool.clone())),
            compilations: Arc::new(PgCompilationStore::new(pool)),
            statistics,
            capacity: CapacityGuard::new(),
        }
    }
}
