//! Participation request actions.

pub mod cancel_request;
pub mod confirm_request;
pub mod create_request;
pub mod decline_request;
pub mod queries;

pub use cancel_request::cancel_request;
pub use confirm_request::confirm_request;
pub use create_request::create_request;
pub use decline_request::decline_request;
pub use queries::{list_for_event, list_for_user};

use tracing::info;

use crate::common::DomainResult;
use crate::domains::events::models::Event;
use crate::domains::requests::capacity::CapacityLease;
use crate::kernel::ServerDeps;

/// Capacity cascade: once the last slot of a limited event is taken, every
/// remaining pending request is rejected in one sweep. Must run under the
/// event's lease, right after the confirming write.
pub(crate) async fn reject_pending_if_full(
    lease: &CapacityLease,
    event: &Event,
    deps: &ServerDeps,
) -> DomainResult<()> {
    if event.participant_limit == 0 {
        return Ok(());
    }
    if deps.capacity.try_reserve(lease, event, deps.requests.as_ref()).await? {
        return Ok(());
    }
    let rejected = deps.requests.reject_pending(event.id).await?;
    if rejected > 0 {
        info!("Event {} is full, rejected {} pending requests", event.id, rejected);
    }
    Ok(())
}
