//! Subscription domain - follow a friend and see the events they organize.

pub mod actions;
pub mod models;

pub use models::Subscription;
