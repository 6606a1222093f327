//! World Kernel: scene composition, the per-frame update loop, prize pickup and win rules.
//!
//! # Invariants
//! - `update` is synchronous and never blocks; timers and asset readiness are
//!   driven by the host through explicit calls.
//! - The world owns the score; the player character only mirrors it.
//! - The pickup gate opens once and never closes.
//! - The win sequence runs at most once per session.

pub mod experience;
pub mod factory;
pub mod scene;
pub mod schedule;
pub mod world;

pub use experience::{
    Experience, NoObstacles, NullTracker, ObstacleDirector, RendererState, SessionFlags, Tracker,
};
pub use factory::{EntityFactory, EntitySet, LayoutSource, StandardFactory};
pub use scene::{Scene, SceneEvent, SceneKind, SceneObject};
pub use schedule::{Scheduler, TaskId};
pub use world::{AssetsState, World, WorldError};

use std::time::Duration;

/// Score at which the session is won. One point per prize in the default layout.
pub const WIN_THRESHOLD: u32 = 14;
/// Logical delay after construction before prizes can be picked up.
pub const PICKUP_UNLOCK_DELAY: Duration = Duration::from_millis(2000);
/// Maximum player-to-prize distance, in world units, that counts as contact.
pub const PICKUP_RADIUS: f32 = 1.5;
/// Minimum player speed that counts as moving.
pub const MOVING_EPSILON: f32 = 1e-3;
