use tracing::info;

use crate::common::{DomainError, DomainResult, EventId, RequestId, UserId};
use crate::domains::events::actions::get_owned_event;
use crate::domains::requests::actions::reject_pending_if_full;
use crate::domains::requests::models::{Request, RequestStatus};
use crate::kernel::ServerDeps;

/// Owner confirmation of a pending request.
///
/// The free-slot check and the confirming write run under the event's lease
/// so two confirmations can never both take the last slot. Filling the last
/// slot rejects every remaining pending request.
pub async fn confirm_request(
    event_id: EventId,
    owner_id: UserId,
    request_id: RequestId,
    deps: &ServerDeps,
) -> DomainResult<Request> {
    let event = get_owned_event(event_id, owner_id, deps).await?;
    let mut request = deps
        .requests
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("request {request_id} does not exist")))?;

    if request.event_id != event.id {
        return Err(DomainError::conflict("the request belongs to a different event"));
    }
    if !request.is_pending() {
        return Err(DomainError::conflict("only pending requests can be confirmed"));
    }

    let lease = deps.capacity.acquire(event.id).await;
    if !deps.capacity.try_reserve(&lease, &event, deps.requests.as_ref()).await? {
        return Err(DomainError::conflict("there are no more places"));
    }

    request.status = RequestStatus::Confirmed;
    let request = deps.requests.update(request).await?;
    reject_pending_if_full(&lease, &event, deps).await?;

    info!("User {} confirmed request {} for event {}", owner_id, request_id, event_id);
    Ok(request)
}
