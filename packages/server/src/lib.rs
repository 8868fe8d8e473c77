// Event registration platform - server core
//
// Organizers publish events with an optional participant cap; users submit
// participation requests that are confirmed without ever exceeding that cap.
// Architecture follows domain-driven design: domain logic lives in
// domains/*/actions, infrastructure behind trait seams in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
