use chrono::Utc;
use tracing::info;

use crate::common::{DomainError, DomainResult, EventId, UserId};
use crate::domains::events::models::EventState;
use crate::domains::requests::actions::reject_pending_if_full;
use crate::domains::requests::models::{Request, RequestStatus};
use crate::kernel::ServerDeps;

/// Files a participation request for a published event.
///
/// Owners cannot request their own event. When the event skips moderation
/// the request is confirmed immediately, which can fill the last slot and
/// trigger the cascade; both the capacity check and the write happen under
/// the event's lease.
pub async fn create_request(user_id: UserId, event_id: EventId, deps: &ServerDeps) -> DomainResult<Request> {
    deps.users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("user {user_id} does not exist")))?;
    let event = deps
        .events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("event {event_id} does not exist")))?;

    if event.is_owned_by(user_id) {
        return Err(DomainError::conflict("you cannot request your own event"));
    }
    if event.state != EventState::Published {
        return Err(DomainError::conflict("the event has not yet been published"));
    }
    // One request per user and event, matching the storage unique constraint
    let existing = deps.requests.find_by_user(user_id).await?;
    if existing.iter().any(|r| r.event_id == event_id) {
        return Err(DomainError::conflict("you have already requested this event"));
    }

    let lease = deps.capacity.acquire(event.id).await;
    if !deps.capacity.try_reserve(&lease, &event, deps.requests.as_ref()).await? {
        return Err(DomainError::conflict("there are no more places"));
    }

    let mut request = Request::new(user_id, event_id, Utc::now());
    if !event.request_moderation {
        request.status = RequestStatus::Confirmed;
    }
    let request = deps.requests.insert(request).await?;

    if request.status == RequestStatus::Confirmed {
        reject_pending_if_full(&lease, &event, deps).await?;
    }

    info!(
        "User {} requested event {} ({})",
        user_id,
        event_id,
        request.status.as_str()
    );
    Ok(request)
}
