//! Participation request domain.
//!
//! A request is a user's application to attend a published event. Requests
//! start Pending (or Confirmed immediately when the event skips moderation)
//! and are moved by the event owner to Confirmed or Rejected, or by the
//! requester to Canceled. Confirmation respects the event's participant
//! limit; filling the last seat rejects every remaining pending request.

pub mod actions;
pub mod capacity;
pub mod models;

pub use capacity::{CapacityGuard, CapacityLease};
pub use models::{Request, RequestStatus};
