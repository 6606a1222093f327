//! Shared value types: entity ids, transforms, physics bodies.

pub mod types;

pub use types::{Body, EntityId, Transform};
