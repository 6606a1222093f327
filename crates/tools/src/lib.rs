//! Developer tooling: read-only queries against the world for debugging and logs.
//!
//! # Invariants
//! - Tools never mutate the world.

pub mod inspector;

pub use inspector::{WorldInspector, WorldSummary};
