//! Compilation domain - curated, optionally pinned selections of events.
//!
//! Compilations are assembled by administrators; the public side only lists
//! and reads them, with the member events enriched like any other event
//! read model.

pub mod actions;
pub mod models;

pub use models::{Compilation, CompilationDetails, NewCompilation};
