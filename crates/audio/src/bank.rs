use std::collections::BTreeMap;

use crate::{AMBIENT_SOUND_PATH, COIN_SOUND_PATH, WIN_SOUND_PATH};

/// Errors a playback backend may report. The bank never surfaces them.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("sound not loaded: {0}")]
    NotLoaded(String),
    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// Playback engine contract.
pub trait AudioBackend {
    fn load(&mut self, path: &str) -> Result<(), AudioError>;
    fn play(&mut self, path: &str, looped: bool) -> Result<(), AudioError>;
    fn pause(&mut self, path: &str) -> Result<(), AudioError>;
}

/// Backend that accepts every command and plays nothing. Used headless.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn load(&mut self, _path: &str) -> Result<(), AudioError> {
        Ok(())
    }

    fn play(&mut self, path: &str, _looped: bool) -> Result<(), AudioError> {
        tracing::trace!(path, "play (muted)");
        Ok(())
    }

    fn pause(&mut self, _path: &str) -> Result<(), AudioError> {
        Ok(())
    }
}

/// The sounds the world knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SoundKey {
    Coin,
    Ambient,
    Win,
}

/// A single sound handle bound to an asset path.
#[derive(Debug, Clone)]
pub struct Sound {
    pub path: &'static str,
    pub looped: bool,
    playing: bool,
    loaded: bool,
    touched: bool,
}

impl Sound {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether the sound has been played or toggled at least once.
    pub fn is_touched(&self) -> bool {
        self.touched
    }
}

/// Holds the world's sounds and forwards play/toggle commands to the backend.
pub struct SoundBank {
    backend: Box<dyn AudioBackend>,
    sounds: BTreeMap<SoundKey, Sound>,
}

impl SoundBank {
    /// Bind the coin, ambient and win sounds to their fixed paths.
    ///
    /// A sound whose load fails is kept; playing it later is attempted again
    /// and any error is swallowed.
    pub fn new(mut backend: Box<dyn AudioBackend>) -> Self {
        let mut sounds = BTreeMap::new();
        for (key, path, looped) in [
            (SoundKey::Coin, COIN_SOUND_PATH, false),
            (SoundKey::Ambient, AMBIENT_SOUND_PATH, true),
            (SoundKey::Win, WIN_SOUND_PATH, false),
        ] {
            let loaded = match backend.load(path) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(path, error = %e, "sound failed to load");
                    false
                }
            };
            sounds.insert(
                key,
                Sound {
                    path,
                    looped,
                    playing: false,
                    loaded,
                    touched: false,
                },
            );
        }
        Self { backend, sounds }
    }

    pub fn get(&self, key: SoundKey) -> Option<&Sound> {
        self.sounds.get(&key)
    }

    /// Start a sound from the top. One-shot sounds are not tracked as playing.
    pub fn play(&mut self, key: SoundKey) {
        let Some(sound) = self.sounds.get_mut(&key) else {
            return;
        };
        sound.touched = true;
        match self.backend.play(sound.path, sound.looped) {
            Ok(()) => sound.playing = sound.looped,
            Err(e) => tracing::warn!(path = sound.path, error = %e, "playback failed"),
        }
    }

    /// Play a sound only if nothing has played or toggled it yet.
    /// Returns whether playback was started.
    pub fn play_if_idle(&mut self, key: SoundKey) -> bool {
        match self.sounds.get(&key) {
            Some(sound) if !sound.touched => {
                self.play(key);
                true
            }
            _ => false,
        }
    }

    /// Pause a playing sound or resume a paused one.
    pub fn toggle(&mut self, key: SoundKey) {
        let Some(sound) = self.sounds.get_mut(&key) else {
            return;
        };
        sound.touched = true;
        let result = if sound.playing {
            self.backend.pause(sound.path)
        } else {
            self.backend.play(sound.path, sound.looped)
        };
        match result {
            Ok(()) => sound.playing = !sound.playing,
            Err(e) => tracing::warn!(path = sound.path, error = %e, "toggle failed"),
        }
    }
}

impl std::fmt::Debug for SoundBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundBank")
            .field("sounds", &self.sounds)
            .finish_non_exhaustive()
    }
}
