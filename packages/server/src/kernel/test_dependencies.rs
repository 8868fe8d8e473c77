// TestDependencies - mock implementations for testing
//
// Provides a mock statistics service plus a builder for a fully in-memory
// ServerDeps. Available outside cfg(test) so integration tests can use it.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::common::EventId;
use crate::kernel::{BaseStatisticsService, ServerDeps};

// =============================================================================
// Mock Statistics Service
// =============================================================================

pub struct MockStatisticsService {
    counts: Mutex<HashMap<EventId, u64>>,
    unavailable: Mutex<bool>,
    calls: Mutex<Vec<Vec<EventId>>>,
}

impl MockStatisticsService {
    pub fn new() -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
            unavailable: Mutex::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_count(self, event_id: EventId, hits: u64) -> Self {
        self.counts.lock().unwrap().insert(event_id, hits);
        self
    }

    pub fn set_count(&self, event_id: EventId, hits: u64) {
        self.counts.lock().unwrap().insert(event_id, hits);
    }

    /// Makes every subsequent call fail, simulating an outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// Batches the service was queried with, in call order.
    pub fn calls(&self) -> Vec<Vec<EventId>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockStatisticsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseStatisticsService for MockStatisticsService {
    async fn view_counts(&self, event_ids: &[EventId]) -> Result<HashMap<EventId, u64>> {
        self.calls.lock().unwrap().push(event_ids.to_vec());
        if *self.unavailable.lock().unwrap() {
            anyhow::bail!("connection refused");
        }
        let counts = self.counts.lock().unwrap();
        Ok(event_ids
            .iter()
            .filter_map(|id| counts.get(id).map(|hits| (*id, *hits)))
            .collect())
    }
}

// =============================================================================
// Builders
// =============================================================================

/// In-memory ServerDeps with a mock statistics service; returns the mock
/// separately so tests can steer it.
pub fn test_deps() -> (ServerDeps, Arc<MockStatisticsService>) {
    let statistics = Arc::new(MockStatisticsService::new());
    let deps = ServerDeps::in_memory(statistics.clone());
    (deps, statistics)
}
