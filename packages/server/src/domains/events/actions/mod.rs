//! Event lifecycle actions.
//!
//! Each action loads the aggregate, checks the state-machine rules, and
//! persists the new state through the store traits.

pub mod cancel_event;
pub mod create_event;
pub mod decline_event;
pub mod publish_event;
pub mod queries;
pub mod update_event;

pub use cancel_event::cancel_event;
pub use create_event::create_event;
pub use decline_event::decline_event;
pub use publish_event::publish_event;
pub use queries::{find_event, find_user_event, find_user_events, search_events};
pub use update_event::{admin_update_event, update_event};

use crate::common::{DomainError, DomainResult, EventId, UserId};
use crate::domains::events::models::Event;
use crate::kernel::ServerDeps;

/// Loads an event and verifies the caller owns it. A foreign event is a
/// Forbidden, not a NotFound: the caller learns the event exists but may
/// not touch it.
pub(crate) async fn get_owned_event(
    event_id: EventId,
    owner_id: UserId,
    deps: &ServerDeps,
) -> DomainResult<Event> {
    let event = deps
        .events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("event {event_id} does not exist")))?;

    if !event.is_owned_by(owner_id) {
        return Err(DomainError::forbidden("you cannot access someone else's event"));
    }
    Ok(event)
}
