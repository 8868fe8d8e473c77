//! Category domain - reference data events are classified under.

pub mod actions;
pub mod models;

pub use models::Category;
