use std::time::Duration;

use prizehunt_assets::{AssetManifest, AssetReadyGate};
use prizehunt_audio::AudioBackend;
use prizehunt_input::{Controls, NullVrBinder, VrBinder};
use serde::{Deserialize, Serialize};

use crate::factory::{EntityFactory, StandardFactory};
use crate::scene::Scene;

/// Telemetry and end-of-game UI.
pub trait Tracker {
    fn show_cancel_button(&mut self);
    /// Stop the session timer at logical time `at`.
    fn stop(&mut self, at: Duration);
    fn save_time(&mut self);
    fn show_end_game_modal(&mut self);
}

/// Spawns and clears obstacle waves.
pub trait ObstacleDirector {
    fn remove_all_obstacles(&mut self);
    fn remove_random_obstacles(&mut self);
    /// Logical time passed. Directors that spawn on a timer hook in here.
    fn advance(&mut self, _elapsed: Duration, _session: &SessionFlags) {}
}

/// Tracker that only logs.
#[derive(Debug, Default)]
pub struct NullTracker;

impl Tracker for NullTracker {
    fn show_cancel_button(&mut self) {
        tracing::debug!("tracker: cancel button");
    }

    fn stop(&mut self, at: Duration) {
        tracing::debug!(elapsed_ms = at.as_millis() as u64, "tracker: stop");
    }

    fn save_time(&mut self) {
        tracing::debug!("tracker: save time");
    }

    fn show_end_game_modal(&mut self) {
        tracing::debug!("tracker: end game modal");
    }
}

/// Director for sessions without obstacles.
#[derive(Debug, Default)]
pub struct NoObstacles;

impl ObstacleDirector for NoObstacles {
    fn remove_all_obstacles(&mut self) {}
    fn remove_random_obstacles(&mut self) {}
}

/// Menu-controlled session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFlags {
    /// Over-the-shoulder camera. False means head-mounted view.
    pub is_third_person: bool,
    pub obstacle_waves_disabled: bool,
    /// Logical time between obstacle waves.
    pub obstacle_wave_timeout: Duration,
}

impl Default for SessionFlags {
    fn default() -> Self {
        Self {
            is_third_person: true,
            obstacle_waves_disabled: false,
            obstacle_wave_timeout: Duration::from_secs(10),
        }
    }
}

/// What the world needs to know about the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererState {
    pub xr_presenting: bool,
}

/// The hosting experience: collaborators and session state the world reads
/// and, in a few places, mutates.
pub struct Experience {
    pub scene: Scene,
    pub resources: AssetReadyGate,
    pub renderer: RendererState,
    pub controls: Controls,
    pub session: SessionFlags,
    pub tracker: Box<dyn Tracker>,
    pub vr: Box<dyn VrBinder>,
    pub obstacles: Box<dyn ObstacleDirector>,
    pub factory: Box<dyn EntityFactory>,
    /// Taken by the world at construction to build its sound bank.
    pub audio: Option<Box<dyn AudioBackend>>,
}

impl Experience {
    /// Headless experience: default manifest, standard entities, no-op collaborators.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            resources: AssetManifest::default().gate(),
            renderer: RendererState::default(),
            controls: Controls::new(),
            session: SessionFlags::default(),
            tracker: Box::new(NullTracker),
            vr: Box::new(NullVrBinder::default()),
            obstacles: Box::new(NoObstacles),
            factory: Box::new(StandardFactory::default()),
            audio: None,
        }
    }

    pub fn with_resources(mut self, resources: AssetReadyGate) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_session(mut self, session: SessionFlags) -> Self {
        self.session = session;
        self
    }

    pub fn with_tracker(mut self, tracker: impl Tracker + 'static) -> Self {
        self.tracker = Box::new(tracker);
        self
    }

    pub fn with_vr(mut self, vr: impl VrBinder + 'static) -> Self {
        self.vr = Box::new(vr);
        self
    }

    pub fn with_obstacles(mut self, obstacles: impl ObstacleDirector + 'static) -> Self {
        self.obstacles = Box::new(obstacles);
        self
    }

    pub fn with_factory(mut self, factory: impl EntityFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioBackend + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Experience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Experience")
            .field("scene_objects", &self.scene.len())
            .field("resources", &self.resources.state())
            .field("renderer", &self.renderer)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
