use std::time::Duration;

use glam::Vec3;
use prizehunt_common::EntityId;
use prizehunt_kernel::{ObstacleDirector, SessionFlags};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Wave spawning configuration.
#[derive(Debug, Clone)]
pub struct WaveConfig {
    /// Obstacles spawned per wave.
    pub wave_size: usize,
    /// Cap on simultaneously active obstacles.
    pub max_active: usize,
    /// Outer bound of obstacle placement, measured from the origin.
    pub arena_radius: f32,
    /// Inner bound of obstacle placement. Keeps the player spawn clear.
    pub clear_radius: f32,
    pub seed: u64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            wave_size: 3,
            max_active: 12,
            arena_radius: 15.0,
            clear_radius: 3.0,
            seed: 0x0b57_ac1e,
        }
    }
}

/// A single placed obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: EntityId,
    pub position: Vec3,
    /// Wave number that spawned it, starting at 1.
    pub wave: u32,
}

/// Running totals for instrumentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaveStats {
    pub waves_spawned: u32,
    pub obstacles_spawned: usize,
    pub obstacles_removed: usize,
}

/// Spawns a wave every `SessionFlags::obstacle_wave_timeout` of logical time.
pub struct WaveDirector {
    pub config: WaveConfig,
    obstacles: Vec<Obstacle>,
    since_wave: Duration,
    rng: ChaCha8Rng,
    stats: WaveStats,
}

impl WaveDirector {
    pub fn new(config: WaveConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            obstacles: Vec::new(),
            since_wave: Duration::ZERO,
            rng,
            stats: WaveStats::default(),
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn stats(&self) -> &WaveStats {
        &self.stats
    }

    /// Spawn one wave immediately, respecting the cap. Returns how many spawned.
    pub fn spawn_wave(&mut self) -> usize {
        let room = self.config.max_active.saturating_sub(self.obstacles.len());
        let count = self.config.wave_size.min(room);
        self.stats.waves_spawned += 1;
        let wave = self.stats.waves_spawned;
        for _ in 0..count {
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let dist = self
                .rng
                .gen_range(self.config.clear_radius..=self.config.arena_radius);
            self.obstacles.push(Obstacle {
                id: EntityId::new(),
                position: Vec3::new(angle.cos() * dist, 0.0, angle.sin() * dist),
                wave,
            });
        }
        self.stats.obstacles_spawned += count;
        tracing::debug!(
            wave,
            spawned = count,
            active = self.obstacles.len(),
            "obstacle wave"
        );
        count
    }
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new(WaveConfig::default())
    }
}

impl ObstacleDirector for WaveDirector {
    fn remove_all_obstacles(&mut self) {
        let removed = self.obstacles.len();
        self.obstacles.clear();
        self.stats.obstacles_removed += removed;
        tracing::debug!(removed, "all obstacles removed");
    }

    /// Remove about half of the active obstacles, chosen by the seeded RNG.
    fn remove_random_obstacles(&mut self) {
        let target = self.obstacles.len().div_ceil(2);
        for _ in 0..target {
            let index = self.rng.gen_range(0..self.obstacles.len());
            self.obstacles.swap_remove(index);
        }
        self.stats.obstacles_removed += target;
        tracing::debug!(
            removed = target,
            active = self.obstacles.len(),
            "random obstacles removed"
        );
    }

    fn advance(&mut self, elapsed: Duration, session: &SessionFlags) {
        let timeout = session.obstacle_wave_timeout;
        if session.obstacle_waves_disabled || timeout.is_zero() {
            self.since_wave = Duration::ZERO;
            return;
        }
        self.since_wave += elapsed;
        while self.since_wave >= timeout {
            self.since_wave -= timeout;
            self.spawn_wave();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prizehunt_assets::{AssetId, AssetManifest};
    use prizehunt_kernel::{Experience, WIN_THRESHOLD, World};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Lets the test keep a handle on a director the world owns.
    struct Shared(Rc<RefCell<WaveDirector>>);

    impl ObstacleDirector for Shared {
        fn remove_all_obstacles(&mut self) {
            self.0.borrow_mut().remove_all_obstacles();
        }
        fn remove_random_obstacles(&mut self) {
            self.0.borrow_mut().remove_random_obstacles();
        }
        fn advance(&mut self, elapsed: Duration, session: &SessionFlags) {
            self.0.borrow_mut().advance(elapsed, session);
        }
    }

    fn session(timeout_secs: u64) -> SessionFlags {
        SessionFlags {
            obstacle_wave_timeout: Duration::from_secs(timeout_secs),
            ..SessionFlags::default()
        }
    }

    #[test]
    fn wave_config_defaults() {
        let config = WaveConfig::default();
        assert_eq!(config.wave_size, 3);
        assert_eq!(config.max_active, 12);
        assert!(config.clear_radius < config.arena_radius);
    }

    #[test]
    fn spawns_on_timeout() {
        let mut director = WaveDirector::default();
        let s = session(10);
        director.advance(Duration::from_secs(9), &s);
        assert!(director.obstacles().is_empty());
        director.advance(Duration::from_secs(1), &s);
        assert_eq!(director.obstacles().len(), 3);
        assert_eq!(director.stats().waves_spawned, 1);
    }

    #[test]
    fn long_advance_spawns_several_waves() {
        let mut director = WaveDirector::default();
        director.advance(Duration::from_secs(30), &session(10));
        assert_eq!(director.stats().waves_spawned, 3);
        assert_eq!(director.obstacles().len(), 9);
    }

    #[test]
    fn respects_active_cap() {
        let mut director = WaveDirector::new(WaveConfig {
            wave_size: 5,
            max_active: 7,
            ..WaveConfig::default()
        });
        director.spawn_wave();
        assert_eq!(director.spawn_wave(), 2);
        assert_eq!(director.spawn_wave(), 0);
        assert_eq!(director.obstacles().len(), 7);
    }

    #[test]
    fn disabled_waves_do_not_spawn() {
        let mut director = WaveDirector::default();
        let s = SessionFlags {
            obstacle_waves_disabled: true,
            ..session(1)
        };
        director.advance(Duration::from_secs(60), &s);
        assert!(director.obstacles().is_empty());
    }

    #[test]
    fn zero_timeout_is_treated_as_disabled() {
        let mut director = WaveDirector::default();
        director.advance(Duration::from_secs(5), &session(0));
        assert!(director.obstacles().is_empty());
    }

    #[test]
    fn obstacles_land_in_the_ring() {
        let mut director = WaveDirector::new(WaveConfig {
            wave_size: 50,
            max_active: 50,
            ..WaveConfig::default()
        });
        director.spawn_wave();
        let config = &director.config;
        for o in director.obstacles() {
            let d = o.position.length();
            assert!(d >= config.clear_radius - 1e-4 && d <= config.arena_radius + 1e-4);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let mut a = WaveDirector::default();
        let mut b = WaveDirector::default();
        a.spawn_wave();
        b.spawn_wave();
        let pa: Vec<Vec3> = a.obstacles().iter().map(|o| o.position).collect();
        let pb: Vec<Vec3> = b.obstacles().iter().map(|o| o.position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn remove_all_clears() {
        let mut director = WaveDirector::default();
        director.spawn_wave();
        director.remove_all_obstacles();
        assert!(director.obstacles().is_empty());
        assert_eq!(director.stats().obstacles_removed, 3);
    }

    #[test]
    fn remove_random_removes_half_rounded_up() {
        let mut director = WaveDirector::default();
        director.spawn_wave();
        director.remove_random_obstacles();
        assert_eq!(director.obstacles().len(), 1);
        director.remove_random_obstacles();
        assert!(director.obstacles().is_empty());
        director.remove_random_obstacles();
        assert!(director.obstacles().is_empty());
    }

    #[test]
    fn winning_clears_waves_and_stops_new_ones() {
        let director = Rc::new(RefCell::new(WaveDirector::default()));
        let manifest = AssetManifest::default();
        let experience = Experience::new()
            .with_resources(manifest.gate())
            .with_obstacles(Shared(director.clone()));
        let mut world = World::new(experience);
        for path in &manifest.models {
            world.asset_loaded(AssetId::for_path(path)).unwrap();
        }
        let timeout = world.experience().session.obstacle_wave_timeout;

        world.advance(timeout);
        assert_eq!(director.borrow().obstacles().len(), 3);

        world.set_points(WIN_THRESHOLD);
        world.update(0.016);
        assert!(world.has_won());
        assert!(world.experience().session.obstacle_waves_disabled);
        assert!(director.borrow().obstacles().is_empty());

        for _ in 0..5 {
            world.advance(timeout);
            world.update(0.016);
        }
        assert!(director.borrow().obstacles().is_empty());
        assert_eq!(director.borrow().stats().waves_spawned, 1);
    }
}
