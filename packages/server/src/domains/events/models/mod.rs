pub mod event;

pub use event::{Event, EventFilters, EventPatch, EventState, NewEvent, Window};
