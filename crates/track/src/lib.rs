//! Tracking: session timing, cancel/end-game UI flags, persisted completion times.
//!
//! # Invariants
//! - The recorded time is the logical time the world reported at `stop`.
//! - A failed save never panics; it is logged and kept for inspection.
//! - The times file is only ever rewritten whole.

mod tracker;

pub use tracker::{SessionTracker, TimeRecord, TimesFile, TrackError};
