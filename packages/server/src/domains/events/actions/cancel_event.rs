use tracing::info;

use crate::common::{DomainError, DomainResult, EventId, UserId};
use crate::domains::events::actions::get_owned_event;
use crate::domains::events::models::{Event, EventState};
use crate::kernel::ServerDeps;

/// Owner cancellation of their own draft. Only Pending events qualify; a
/// published event can only be taken down by an administrator.
pub async fn cancel_event(event_id: EventId, owner_id: UserId, deps: &ServerDeps) -> DomainResult<Event> {
    let mut event = get_owned_event(event_id, owner_id, deps).await?;

    if event.state != EventState::Pending {
        return Err(DomainError::conflict("only pending events can be canceled"));
    }

    event.state = EventState::Canceled;
    let event = deps.events.update(event).await?;
    info!("User {} canceled event {}", owner_id, event.id);
    Ok(event)
}
