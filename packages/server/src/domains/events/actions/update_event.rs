use chrono::{Duration, Utc};
use tracing::info;

use crate::common::{DomainError, DomainResult, EventId, UserId};
use crate::domains::events::actions::get_owned_event;
use crate::domains::events::models::{Event, EventPatch, EventState};
use crate::kernel::ServerDeps;

/// Owner update. Only Pending or Canceled events may be edited, and a new
/// event date must stay at least two hours in the future.
pub async fn update_event(
    event_id: EventId,
    owner_id: UserId,
    patch: EventPatch,
    deps: &ServerDeps,
) -> DomainResult<Event> {
    let mut event = get_owned_event(event_id, owner_id, deps).await?;

    if !matches!(event.state, EventState::Pending | EventState::Canceled) {
        return Err(DomainError::conflict("only pending or canceled events can be changed"));
    }
    validate_patch(&patch, deps).await?;
    if let Some(event_date) = patch.event_date {
        if event_date < Utc::now() + Duration::hours(2) {
            return Err(DomainError::conflict(
                "the event date must be at least two hours in the future",
            ));
        }
    }

    event.apply_patch(patch);
    let event = deps.events.update(event).await?;
    info!("User {} updated event {}", owner_id, event.id);
    Ok(event)
}

/// Administrative update. No state restriction and no lead-time rule; the
/// admin is trusted to fix whatever needs fixing.
pub async fn admin_update_event(
    event_id: EventId,
    patch: EventPatch,
    deps: &ServerDeps,
) -> DomainResult<Event> {
    let mut event = deps
        .events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("event {event_id} does not exist")))?;

    validate_patch(&patch, deps).await?;
    event.apply_patch(patch);
    let event = deps.events.update(event).await?;
    info!("Admin updated event {}", event.id);
    Ok(event)
}

async fn validate_patch(patch: &EventPatch, deps: &ServerDeps) -> DomainResult<()> {
    if let Some(category_id) = patch.category_id {
        deps.categories.find_by_id(category_id).await?.ok_or_else(|| {
            DomainError::not_found(format!("category {category_id} does not exist"))
        })?;
    }
    Ok(())
}
