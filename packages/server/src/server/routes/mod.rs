pub mod admin;
pub mod compilations;
pub mod events;
pub mod health;
pub mod requests;
pub mod subscriptions;
