//! Event read-side queries. Every query answers with an enriched read model.

use crate::common::{DomainError, DomainResult, EventId, UserId};
use crate::domains::events::data::{enrich_read_models, EventDetails, EventSummary};
use crate::domains::events::models::{EventFilters, Window};
use crate::kernel::ServerDeps;

use super::get_owned_event;

/// Events owned by a user, as compact summaries.
pub async fn find_user_events(
    owner_id: UserId,
    window: Window,
    deps: &ServerDeps,
) -> DomainResult<Vec<EventSummary>> {
    let events = deps.events.find_by_owner(owner_id).await?;
    let mut summaries: Vec<EventSummary> = events
        .into_iter()
        .skip(window.from)
        .take(window.size)
        .map(EventSummary::from)
        .collect();
    enrich_read_models(&mut summaries, deps).await?;
    Ok(summaries)
}

/// Full details of one of the caller's own events.
pub async fn find_user_event(
    event_id: EventId,
    owner_id: UserId,
    deps: &ServerDeps,
) -> DomainResult<EventDetails> {
    let event = get_owned_event(event_id, owner_id, deps).await?;
    let mut details = vec![EventDetails::from(event)];
    enrich_read_models(&mut details, deps).await?;
    Ok(details.remove(0))
}

/// Full details of any event.
pub async fn find_event(event_id: EventId, deps: &ServerDeps) -> DomainResult<EventDetails> {
    let event = deps
        .events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("event {event_id} does not exist")))?;
    let mut details = vec![EventDetails::from(event)];
    enrich_read_models(&mut details, deps).await?;
    Ok(details.remove(0))
}

/// Filtered search over all events, ordered by event date.
pub async fn search_events(
    filters: EventFilters,
    window: Window,
    deps: &ServerDeps,
) -> DomainResult<Vec<EventDetails>> {
    let events = deps.events.search(&filters, window).await?;
    let mut details: Vec<EventDetails> = events.into_iter().map(EventDetails::from).collect();
    enrich_read_models(&mut details, deps).await?;
    Ok(details)
}
