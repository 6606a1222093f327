//! Embodiment modes: keyboard movement and VR controller binding mapped to shared actions.
//!
//! # Invariants
//! - Keyboard and VR produce the same actions; neither forks world logic.
//! - The VR binder learns about the player character exactly once per session.

pub mod action;
pub mod controls;
pub mod vr;

pub use action::Action;
pub use controls::{Controls, Direction};
pub use vr::{NullVrBinder, VrBinder};
