use std::time::Duration;

use prizehunt_assets::{AssetError, AssetId, ReadySignal};
use prizehunt_audio::{NullAudio, SoundBank, SoundKey};
use prizehunt_common::EntityId;
use prizehunt_entities::{CameraRig, Character, Entity, Environment, Floor, Prize, PrizeLoader};
use prizehunt_input::Action;

use crate::experience::Experience;
use crate::factory::EntitySet;
use crate::scene::Scene;
use crate::schedule::Scheduler;
use crate::{MOVING_EPSILON, PICKUP_RADIUS, PICKUP_UNLOCK_DELAY, WIN_THRESHOLD};

/// Errors surfaced to the hosting experience.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("asset error: {0}")]
    Assets(#[from] AssetError),
    /// A custom factory could not produce the entity set.
    #[error("entity construction failed")]
    Build(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Where the world is in its asset lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetsState {
    Pending,
    Ready,
    /// The ready handler ran but entity construction failed.
    Failed,
}

/// Work the world schedules on its own clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorldTask {
    UnlockPickup,
}

/// The authoritative game world.
///
/// Owns the score, the pickup gate and the win flag. Entity wrappers are
/// absent until the asset gate fires; every per-frame step tolerates that.
pub struct World {
    experience: Experience,
    sounds: SoundBank,
    scheduler: Scheduler<WorldTask>,
    assets: AssetsState,
    points: u32,
    allow_prize_pickup: bool,
    has_moved: bool,
    has_won: bool,
    quit_requested: bool,
    floor: Option<Floor>,
    environment: Option<Environment>,
    fox: Option<Box<dyn Entity>>,
    robot: Option<Box<dyn Character>>,
    camera: Option<Box<dyn CameraRig>>,
    loader: Option<PrizeLoader>,
}

impl World {
    /// Wire the world into its experience and start the pickup timer.
    ///
    /// Nothing observable happens until the asset gate fires or logical time
    /// reaches the unlock delay.
    pub fn new(mut experience: Experience) -> Self {
        let audio = experience
            .audio
            .take()
            .unwrap_or_else(|| Box::new(NullAudio));
        let sounds = SoundBank::new(audio);

        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(PICKUP_UNLOCK_DELAY, WorldTask::UnlockPickup);

        tracing::debug!(
            declared_assets = experience.resources.declared(),
            unlock_ms = PICKUP_UNLOCK_DELAY.as_millis() as u64,
            "world constructed"
        );

        Self {
            experience,
            sounds,
            scheduler,
            assets: AssetsState::Pending,
            points: 0,
            allow_prize_pickup: false,
            has_moved: false,
            has_won: false,
            quit_requested: false,
            floor: None,
            environment: None,
            fox: None,
            robot: None,
            camera: None,
            loader: None,
        }
    }

    // --- Host-driven events ---

    /// Report an asset as loaded. Runs the ready handler if this completes the gate.
    pub fn asset_loaded(&mut self, id: AssetId) -> Result<(), WorldError> {
        match self.experience.resources.mark_loaded(id)? {
            Some(signal) => self.on_ready(signal),
            None => Ok(()),
        }
    }

    /// Run the ready handler if the gate is complete and has not fired yet.
    /// Returns whether the handler ran.
    pub fn poll_ready(&mut self) -> Result<bool, WorldError> {
        match self.experience.resources.poll() {
            Some(signal) => self.on_ready(signal).map(|()| true),
            None => Ok(false),
        }
    }

    /// Advance logical time, firing any due world tasks.
    pub fn advance(&mut self, elapsed: Duration) {
        for task in self.scheduler.advance(elapsed) {
            match task {
                WorldTask::UnlockPickup => {
                    self.allow_prize_pickup = true;
                    tracing::info!(
                        at_ms = self.scheduler.now().as_millis() as u64,
                        "prize pickup unlocked"
                    );
                }
            }
        }
        self.experience
            .obstacles
            .advance(elapsed, &self.experience.session);
    }

    fn on_ready(&mut self, _signal: ReadySignal) -> Result<(), WorldError> {
        let _span = tracing::info_span!("world_ready").entered();
        let exp = &mut self.experience;
        match exp.factory.build(&mut exp.scene) {
            Ok(set) => {
                self.install(set);
                Ok(())
            }
            Err(e) => {
                self.assets = AssetsState::Failed;
                tracing::error!(error = %e, "entity construction failed");
                Err(e)
            }
        }
    }

    fn install(&mut self, set: EntitySet) {
        let robot_id = set.robot.id();
        let prize_count = set.prizes.len();
        self.floor = Some(set.floor);
        self.environment = Some(set.environment);
        self.fox = Some(set.fox);
        self.robot = Some(set.robot);
        self.camera = Some(set.camera);
        self.loader = Some(set.prizes);
        if let Some(robot) = self.robot.as_mut() {
            robot.set_points(self.points);
        }

        self.experience.tracker.show_cancel_button();
        self.experience.vr.bind_character(robot_id);
        self.sounds.play_if_idle(SoundKey::Ambient);
        self.assets = AssetsState::Ready;

        tracing::info!(
            robot = %robot_id.short(),
            prizes = prize_count,
            "world entities ready"
        );
    }

    // --- Per-frame ---

    /// Advance every entity by `dt` seconds and apply pickup and win rules.
    ///
    /// `dt` may be zero. Safe to call before assets are ready and before the
    /// pickup gate opens.
    pub fn update(&mut self, dt: f32) {
        let _span = tracing::debug_span!("world_update").entered();

        if let Some(fox) = self.fox.as_mut() {
            fox.update(dt);
        }

        if !self.has_moved && self.experience.controls.has_movement_input() {
            self.has_moved = true;
            tracing::info!("player moved for the first time");
        }
        if let Some(robot) = self.robot.as_mut() {
            robot.update(dt, &mut self.experience.controls);
        }

        if self.camera_active() {
            let focus = self.robot.as_ref().map(|r| r.body().position);
            if let Some(camera) = self.camera.as_mut() {
                camera.update(dt, focus);
            }
        }

        self.sync_scene();
        self.collect_prizes(dt);
        self.check_win();

        tracing::trace!(
            points = self.points,
            pickup = self.allow_prize_pickup,
            "frame done"
        );
    }

    /// Mirror the fox, robot and camera positions into the scene registry.
    fn sync_scene(&mut self) {
        let scene = &mut self.experience.scene;
        if let Some(fox) = self.fox.as_ref() {
            scene.move_to(fox.id(), fox.position());
        }
        if let Some(robot) = self.robot.as_ref() {
            scene.move_to(robot.id(), robot.body().position);
        }
        if let Some(camera) = self.camera.as_ref() {
            scene.move_to(camera.id(), camera.position());
        }
    }

    /// Third-person camera runs only outside VR presentation.
    pub fn camera_active(&self) -> bool {
        self.experience.session.is_third_person && !self.experience.renderer.xr_presenting
    }

    /// Score every uncollected prize the moving player touches.
    ///
    /// Before assets are ready there are no prizes and no player, and nothing
    /// is scored.
    fn collect_prizes(&mut self, dt: f32) {
        if !self.allow_prize_pickup {
            return;
        }
        let (Some(loader), Some(robot)) = (self.loader.as_mut(), self.robot.as_mut()) else {
            return;
        };

        let player = *robot.body();
        let moving = player.is_moving(MOVING_EPSILON);

        let mut claimed: Vec<EntityId> = Vec::new();
        for prize in loader.prizes_mut() {
            if prize.is_collected() {
                continue;
            }
            prize.update(dt);
            let within = player.position.distance(prize.pivot_position()) <= PICKUP_RADIUS;
            if within && moving {
                prize.collect();
                claimed.push(prize.id());
            }
        }

        for id in claimed {
            loader.remove(id);
            self.experience.scene.remove(id);
            self.points += 1;
            robot.set_points(self.points);
            self.sounds.play(SoundKey::Coin);
            tracing::info!(
                prize = %id.short(),
                points = self.points,
                remaining = loader.len(),
                "prize collected"
            );
        }
    }

    fn check_win(&mut self) {
        if self.has_won || self.points < WIN_THRESHOLD {
            return;
        }
        self.has_won = true;

        let now = self.scheduler.now();
        let tracker = &mut self.experience.tracker;
        tracker.stop(now);
        tracker.save_time();
        tracker.show_end_game_modal();

        self.experience.session.obstacle_waves_disabled = true;
        self.experience.obstacles.remove_all_obstacles();
        self.sounds.play(SoundKey::Win);

        tracing::info!(
            points = self.points,
            elapsed_ms = now.as_millis() as u64,
            "session won"
        );
    }

    /// Mute or unmute the ambient track.
    pub fn toggle_audio(&mut self) {
        self.sounds.toggle(SoundKey::Ambient);
    }

    /// Route a device-independent action: movement to the controls, menu
    /// actions to the world.
    pub fn apply_action(&mut self, action: &Action) {
        match action {
            Action::Steer(_) | Action::Jump => self.experience.controls.apply(action),
            Action::ToggleAudio => self.toggle_audio(),
            Action::Quit => {
                if !self.quit_requested {
                    tracing::info!(points = self.points, "quit requested");
                }
                self.quit_requested = true;
            }
            Action::Noop => {}
        }
    }

    // --- Accessors ---

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Overwrite the score, e.g. when resuming a session. Mirrored into the robot.
    pub fn set_points(&mut self, points: u32) {
        self.points = points;
        if let Some(robot) = self.robot.as_mut() {
            robot.set_points(points);
        }
    }

    pub fn allow_prize_pickup(&self) -> bool {
        self.allow_prize_pickup
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    /// Set once the player asks to leave. The host decides how to tear down.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn assets_state(&self) -> AssetsState {
        self.assets
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn scene(&self) -> &Scene {
        &self.experience.scene
    }

    pub fn experience(&self) -> &Experience {
        &self.experience
    }

    pub fn experience_mut(&mut self) -> &mut Experience {
        &mut self.experience
    }

    pub fn sounds(&self) -> &SoundBank {
        &self.sounds
    }

    pub fn robot(&self) -> Option<&dyn Character> {
        self.robot.as_deref()
    }

    pub fn prizes(&self) -> Option<&PrizeLoader> {
        self.loader.as_ref()
    }

    pub fn floor(&self) -> Option<&Floor> {
        self.floor.as_ref()
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("points", &self.points)
            .field("allow_prize_pickup", &self.allow_prize_pickup)
            .field("has_moved", &self.has_moved)
            .field("has_won", &self.has_won)
            .field("quit_requested", &self.quit_requested)
            .field("assets", &self.assets)
            .field("prizes", &self.loader)
            .finish_non_exhaustive()
    }
}
