//! Typed ID definitions for all domain entities.
//!
//! Type aliases over [`Id`] give every aggregate its own incompatible ID
//! type, so the compiler catches a `UserId` handed to an event lookup.

pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Event aggregates.
pub struct Event;

/// Marker type for participation Request aggregates.
pub struct Request;

/// Marker type for User entities.
pub struct User;

/// Marker type for Category entities.
pub struct Category;

/// Marker type for Subscription entities.
pub struct Subscription;

/// Marker type for Compilation aggregates.
pub struct Compilation;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Event aggregates.
pub type EventId = Id<Event>;

/// Typed ID for participation Request aggregates.
pub type RequestId = Id<Request>;

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Category entities.
pub type CategoryId = Id<Category>;

/// Typed ID for Subscription entities.
pub type SubscriptionId = Id<Subscription>;

/// Typed ID for Compilation aggregates.
pub type CompilationId = Id<Compilation>;
