//! Event domain - drafting, moderation and publication of events.
//!
//! An event moves through a small state machine: it is drafted as Pending,
//! an administrator either publishes or declines it, and the owner may
//! cancel their own pending draft. Only Published events accept
//! participation requests.

pub mod actions;
pub mod data;
pub mod models;

pub use data::{EventDetails, EventSummary};
pub use models::{Event, EventFilters, EventPatch, EventState, NewEvent, Window};
