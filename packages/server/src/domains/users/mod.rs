//! User domain - reference data for ownership and authorization checks.

pub mod actions;
pub mod models;

pub use models::User;
