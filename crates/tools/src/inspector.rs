use std::time::Duration;

use glam::Vec3;
use prizehunt_entities::{Character, Prize};
use prizehunt_kernel::{AssetsState, SceneKind, World};

/// World inspector for developer tooling.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &World) -> WorldSummary {
        let (prizes_remaining, prizes_total) = world
            .prizes()
            .map(|p| (p.len(), p.initial_count()))
            .unwrap_or((0, 0));
        WorldSummary {
            elapsed: world.now(),
            assets: world.assets_state(),
            points: world.points(),
            prizes_remaining,
            prizes_total,
            pickup_allowed: world.allow_prize_pickup(),
            has_moved: world.has_moved(),
            has_won: world.has_won(),
            player_position: world.robot().map(|r| r.body().position),
            scene_objects: world.scene().len(),
        }
    }

    /// Positions of every prize still in the scene.
    pub fn prize_positions(world: &World) -> Vec<Vec3> {
        world
            .scene()
            .objects()
            .values()
            .filter(|o| o.kind == SceneKind::Prize)
            .map(|o| o.transform.position)
            .collect()
    }

    /// Closest active prize to the player, if both exist.
    pub fn nearest_prize(world: &World) -> Option<Vec3> {
        let player = world.robot()?.body().position;
        world
            .prizes()?
            .prizes()
            .iter()
            .filter(|p| !p.is_collected())
            .map(|p| p.pivot_position())
            .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone)]
pub struct WorldSummary {
    pub elapsed: Duration,
    pub assets: AssetsState,
    pub points: u32,
    pub prizes_remaining: usize,
    pub prizes_total: usize,
    pub pickup_allowed: bool,
    pub has_moved: bool,
    pub has_won: bool,
    pub player_position: Option<Vec3>,
    pub scene_objects: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: t={:.2}s assets={:?} points={} prizes={}/{} pickup={} moved={} won={}",
            self.elapsed.as_secs_f32(),
            self.assets,
            self.points,
            self.prizes_remaining,
            self.prizes_total,
            self.pickup_allowed,
            self.has_moved,
            self.has_won,
        )?;
        if let Some(p) = self.player_position {
            write!(f, " player=({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)?;
        }
        Ok(())
    }
}
