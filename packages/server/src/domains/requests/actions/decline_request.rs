use tracing::info;

use crate::common::{DomainError, DomainResult, EventId, RequestId, UserId};
use crate::domains::events::actions::get_owned_event;
use crate::domains::requests::models::{Request, RequestStatus};
use crate::kernel::ServerDeps;

/// Owner rejection of a pending request. Frees no capacity and needs no
/// lease; Rejected is terminal.
pub async fn decline_request(
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
        return Err(DomainError::conflict("only pending requests can be rejected"));
    }

    request.status = RequestStatus::Rejected;
    let request = deps.requests.update(request).await?;
    info!("User {} rejected request {} for event {}", owner_id, request_id, event_id);
    Ok(request)
}
