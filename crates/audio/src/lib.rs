//! Sound bank: named sound effects and ambient tracks bound to fixed asset paths.
//!
//! # Invariants
//! - Loading or playback failures never propagate; they are logged and swallowed.
//! - Each sound tracks its own playing state; the backend only receives commands.

pub mod bank;

pub use bank::{AudioBackend, AudioError, NullAudio, Sound, SoundBank, SoundKey};

/// Coin pickup effect.
pub const COIN_SOUND_PATH: &str = "/sounds/coin.ogg";
/// Looping background ambience.
pub const AMBIENT_SOUND_PATH: &str = "/sounds/ambiente.mp3";
/// Played once when the session is won.
pub const WIN_SOUND_PATH: &str = "/sounds/winner.mp3";
