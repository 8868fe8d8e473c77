use crate::common::{DomainResult, EventId, UserId};
use crate::domains::events::actions::get_owned_event;
use crate::domains::requests::models::Request;
use crate::kernel::ServerDeps;

/// All requests filed by a user, across events.
pub async fn list_for_user(user_id: UserId, deps: &ServerDeps) -> DomainResult<Vec<Request>> {
    Ok(deps.requests.find_by_user(user_id).await?)
}

/// All requests filed against one of the caller's own events.
pub async fn list_for_event(
    event_id: EventId,
    owner_id: UserId,
    deps: &ServerDeps,
) -> DomainResult<Vec<Request>> {
    get_owned_event(event_id, owner_id, deps).await?;
    Ok(deps.requests.find_by_event(event_id).await?)
}
