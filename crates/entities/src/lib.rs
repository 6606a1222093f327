//! Entity wrappers: the objects the world updates every frame.
//!
//! The world only calls `update` on these and reads a small slice of their
//! state (robot body, prize pivot). Their internals are free to change.
//!
//! # Invariants
//! - A collected prize reports `is_collected() == true` forever after.
//! - The robot never changes its own score; the world mirrors it in.

pub mod camera;
pub mod fox;
pub mod prize;
pub mod robot;
pub mod scenery;

pub use camera::ThirdPersonCamera;
pub use fox::Fox;
pub use prize::{Coin, PrizeLoader};
pub use robot::Robot;
pub use scenery::{Environment, Floor};

use glam::Vec3;
use prizehunt_common::{Body, EntityId};
use prizehunt_input::Controls;

/// Something that animates itself every frame.
pub trait Entity {
    fn id(&self) -> EntityId;
    fn update(&mut self, dt: f32);
    fn position(&self) -> Vec3;
}

/// The player-controlled character.
pub trait Character {
    fn id(&self) -> EntityId;
    /// Integrate one frame. May consume one-shot inputs such as jump.
    fn update(&mut self, dt: f32, controls: &mut Controls);
    fn body(&self) -> &Body;
    fn points(&self) -> u32;
    /// Display mirror of the world score.
    fn set_points(&mut self, points: u32);
}

/// A camera that follows a focus point.
pub trait CameraRig {
    fn id(&self) -> EntityId;
    fn update(&mut self, dt: f32, focus: Option<Vec3>);
    /// Eye position.
    fn position(&self) -> Vec3;
}

/// A collectible.
pub trait Prize {
    fn id(&self) -> EntityId;
    fn is_collected(&self) -> bool;
    fn update(&mut self, dt: f32);
    fn pivot_position(&self) -> Vec3;
    /// Mark collected and run the prize's own pickup effect.
    fn collect(&mut self);
}

/// Exponential smoothing factor for a frame of length `dt`. Zero when `dt` is zero.
pub(crate) fn smoothing(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}
