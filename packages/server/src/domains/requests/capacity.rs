//! Per-event serialization of capacity decisions.
//!
//! Confirming a request is check-then-write: read the confirmed count,
//! compare against the limit, then persist. Two confirmations racing on the
//! same event could both pass the check, so every capacity-sensitive path
//! acquires the event's lease first and holds it until the write (and any
//! cascade) is committed. Different events never contend with each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::common::EventId;
use crate::domains::events::models::Event;
use crate::kernel::BaseRequestStore;

type LockRegistry = Arc<Mutex<HashMap<EventId, Arc<AsyncMutex<()>>>>>;

/// Held while a capacity decision is in flight for one event. Releasing the
/// lease evicts the event's registry entry when nobody else is waiting on
/// it, so the registry stays bounded by in-flight events.
pub struct CapacityLease {
    guard: Option<OwnedMutexGuard<()>>,
    event_id: EventId,
    locks: LockRegistry,
}

impl Drop for CapacityLease {
    fn drop(&mut self) {
        // Release the mutex (and its Arc clone) before inspecting the count
        self.guard.take();
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(lock) = locks.get(&self.event_id) {
            if Arc::strong_count(lock) == 1 {
                locks.remove(&self.event_id);
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct CapacityGuard {
    locks: LockRegistry,
}

impl CapacityGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lease for an event, waiting behind any in-flight
    /// decision on the same event.
    pub async fn acquire(&self, event_id: EventId) -> CapacityLease {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(event_id).or_default().clone()
        };
        CapacityLease {
            guard: Some(lock.lock_owned().await),
            event_id,
            locks: self.locks.clone(),
        }
    }

    /// Whether the event still has a free slot. Requires the caller to hold
    /// the event's lease, which keeps the count stable until the caller
    /// commits its write.
    pub async fn try_reserve(
        &self,
        _lease: &CapacityLease,
        event: &Event,
        requests: &dyn BaseRequestStore,
    ) -> anyhow::Result<bool> {
        if event.participant_limit == 0 {
            return Ok(true);
        }
        let confirmed = requests.confirmed_count(event.id).await?;
        Ok(confirmed < u64::from(event.participant_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn leases_for_different_events_do_not_block() {
        let guard = CapacityGuard::new();
        let _a = guard.acquire(EventId::new()).await;

        let other = timeout(Duration::from_millis(100), guard.acquire(EventId::new())).await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn lease_for_the_same_event_blocks_until_released() {
        let guard = CapacityGuard::new();
        let event_id = EventId::new();

        let held = guard.acquire(event_id).await;
        let blocked = timeout(Duration::from_millis(50), guard.acquire(event_id)).await;
        assert!(blocked.is_err());

        drop(held);
        let unblocked = timeout(Duration::from_millis(100), guard.acquire(event_id)).await;
        assert!(unblocked.is_ok());
    }

    #[tokio::test]
    async fn released_leases_evict_their_registry_entry() {
        let guard = CapacityGuard::new();

        for _ in 0..100 {
            let lease = guard.acquire(EventId::new()).await;
            drop(lease);
        }

        assert!(guard.locks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn entry_survives_while_a_waiter_is_queued() {
        let guard = CapacityGuard::new();
        let event_id = EventId::new();

        let held = guard.acquire(event_id).await;
        let waiter = tokio::spawn({
            let guard = guard.clone();
            async move { guard.acquire(event_id).await }
        });
        tokio::task::yield_now().await;

        drop(held);
        let lease = waiter.await.unwrap();
        assert_eq!(guard.locks.lock().unwrap().len(), 1);

        drop(lease);
        assert!(guard.locks.lock().unwrap().is_empty());
    }
}
