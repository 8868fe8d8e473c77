pub mod categories;
pub mod compilations;
pub mod events;
pub mod requests;
pub mod subscriptions;
pub mod users;
