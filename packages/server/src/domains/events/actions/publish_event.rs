use chrono::{Duration, Utc};
use tracing::info;

use crate::common::{DomainError, DomainResult, EventId};
use crate::domains::events::models::{Event, EventState};
use crate::kernel::ServerDeps;

/// Administrative publication. Only Pending events can be published, and the
/// event must start at least an hour after the moment of publication.
/// Publication happens at most once; `published_at` records when.
pub async fn publish_event(event_id: EventId, deps: &ServerDeps) -> DomainResult<Event> {
    let mut event = deps
        .events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("event {event_id} does not exist")))?;

    if event.state != EventState::Pending {
        return Err(DomainError::conflict("only pending events can be published"));
    }
    let now = Utc::now();
    if event.event_date < now + Duration::hours(1) {
        return Err(DomainError::conflict(
            "the event must start at least an hour after publication",
        ));
    }

    event.state = EventState::Published;
    event.published_at = Some(now);
    let event = deps.events.update(event).await?;
    info!("Published event {} ({})", event.id, event.title);
    Ok(event)
}
