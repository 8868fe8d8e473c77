//! Event read models.
//!
//! Aggregates carry only what the state machine owns; view counts and
//! confirmed-request counts are derived data stitched in at read time.
//! Mutation actions return bare aggregates so a statistics outage can
//! never block a write path.

use serde::Serialize;
use tracing::warn;

use crate::common::{CategoryId, DomainError, DomainResult, EventId, UserId};
use crate::domains::events::models::{Event, EventState};
use crate::kernel::ServerDeps;
use chrono::{DateTime, Utc};

/// Read models that carry a view counter.
pub trait HasViewCount {
    fn event_id(&self) -> EventId;
    fn set_views(&mut self, views: u64);
}

/// Read models that carry a confirmed-request counter.
pub trait HasConfirmedCount {
    fn set_confirmed_requests(&mut self, count: u64);
}

/// Compact listing shape.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    pub annotation: String,
    pub category_id: CategoryId,
    pub paid: bool,
    pub event_date: DateTime<Utc>,
    pub confirmed_requests: u64,
    pub views: u64,
}

impl From<Event> for EventSummary {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            annotation: event.annotation,
            category_id: event.category_id,
            paid: event.paid,
            event_date: event.event_date,
            confirmed_requests: 0,
            views: 0,
        }
    }
}

impl HasViewCount for EventSummary {
    fn event_id(&self) -> EventId {
        self.id
    }

    fn set_views(&mut self, views: u64) {
        self.views = views;
    }
}

impl HasConfirmedCount for EventSummary {
    fn set_confirmed_requests(&mut self, count: u64) {
        self.confirmed_requests = count;
    }
}

/// Full shape for single-event reads.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    pub id: EventId,
    pub owner_id: UserId,
    pub category_id: CategoryId,
    pub title: String,
    pub annotation: String,
    pub description: String,
    pub paid: bool,
    pub event_date: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub participant_limit: u32,
    pub request_moderation: bool,
    pub state: EventState,
    pub created_at: DateTime<Utc>,
    pub confirmed_requests: u64,
    pub views: u64,
}

impl From<Event> for EventDetails {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            owner_id: event.owner_id,
            category_id: event.category_id,
            title: event.title,
            annotation: event.annotation,
            description: event.description,
            paid: event.paid,
            event_date: event.event_date,
            published_at: event.published_at,
            participant_limit: event.participant_limit,
            request_moderation: event.request_moderation,
            state: event.state,
            created_at: event.created_at,
            confirmed_requests: 0,
            views: 0,
        }
    }
}

impl HasViewCount for EventDetails {
    fn event_id(&self) -> EventId {
        self.id
    }

    fn set_views(&mut self, views: u64) {
        self.views = views;
    }
}

impl HasConfirmedCount for EventDetails {
    fn set_confirmed_requests(&mut self, count: u64) {
        self.confirmed_requests = count;
    }
}

/// Fills view counts and confirmed-request counts on a batch of read models.
///
/// A statistics failure surfaces as `StatisticsUnavailable` so the handler
/// can answer 503; events the statistics service has never seen count as
/// zero views.
pub async fn enrich_read_models<T>(models: &mut [T], deps: &ServerDeps) -> DomainResult<()>
where
    T: HasViewCount + HasConfirmedCount,
{
    if models.is_empty() {
        return Ok(());
    }

    let ids: Vec<EventId> = models.iter().map(|m| m.event_id()).collect();
    let views = deps.statistics.view_counts(&ids).await.map_err(|e| {
        warn!("Statistics service failed: {e:#}");
        DomainError::StatisticsUnavailable(e.to_string())
    })?;

    for model in models.iter_mut() {
        let id = model.event_id();
        model.set_views(views.get(&id).copied().unwrap_or(0));
        let confirmed = deps.requests.confirmed_count(id).await?;
        model.set_confirmed_requests(confirmed);
    }
    Ok(())
}
