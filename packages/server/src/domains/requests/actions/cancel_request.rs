use tracing::info;

use crate::common::{DomainError, DomainResult, RequestId, UserId};
use crate::domains::requests::models::{Request, RequestStatus};
use crate::kernel::ServerDeps;

/// Requester cancellation. Moves the request to Canceled regardless of its
/// prior status; canceling twice is a no-op that still answers Canceled.
/// The caller id is recorded in the log only; any authenticated user may
/// cancel by request id.
pub async fn cancel_request(user_id: UserId, request_id: RequestId, deps: &ServerDeps) -> DomainResult<Request> {
    let mut request = deps
        .requests
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("request {request_id} does not exist")))?;

    request.status = RequestStatus::Canceled;
    let request = deps.requests.update(request).await?;
    info!("User {} canceled request {}", user_id, request_id);
    Ok(request)
}
