use tracing::info;

use crate::common::{DomainError, DomainResult, EventId};
use crate::domains::events::models::{Event, EventState};
use crate::kernel::ServerDeps;

/// Administrative rejection. A published event is out of reach; anything
/// else moves to Canceled.
pub async fn decline_event(event_id: EventId, deps: &ServerDeps) -> DomainResult<Event> {
    let mut event = deps
        .events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("event {event_id} does not exist")))?;

    if event.state == EventState::Published {
        return Err(DomainError::conflict("a published event cannot be declined"));
    }

    event.state = EventState::Canceled;
    let event = deps.events.update(event).await?;
    info!("Admin declined event {}", event.id);
    Ok(event)
}
