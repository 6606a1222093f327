//! Obstacle waves: timed spawning on the logical clock, bulk and random removal.
//!
//! # Invariants
//! - No wave spawns while the session has waves disabled.
//! - Active obstacles never exceed the configured cap.
//! - Placement is reproducible from the seed.

mod waves;

pub use waves::{Obstacle, WaveConfig, WaveDirector, WaveStats};
