use std::path::PathBuf;

use glam::Vec3;
use prizehunt_assets::PrizeLayout;
use prizehunt_common::Transform;
use prizehunt_entities::{
    CameraRig, Character, Entity, Environment, Floor, Fox, Prize, PrizeLoader, Robot,
    ThirdPersonCamera,
};

use crate::scene::{Scene, SceneKind};
use crate::world::WorldError;

/// Everything the ready handler installs into the world.
pub struct EntitySet {
    pub floor: Floor,
    pub environment: Environment,
    pub fox: Box<dyn Entity>,
    pub robot: Box<dyn Character>,
    pub camera: Box<dyn CameraRig>,
    pub prizes: PrizeLoader,
}

/// Builds entity wrappers once assets are ready.
///
/// May load dynamic content; a failure leaves the world without entities.
pub trait EntityFactory {
    fn build(&mut self, scene: &mut Scene) -> Result<EntitySet, WorldError>;
}

/// Where prize placements come from.
#[derive(Debug, Clone)]
pub enum LayoutSource {
    Default,
    Inline(PrizeLayout),
    File(PathBuf),
}

/// Floor, lighting, a fox, the robot at the origin, a trailing camera, and
/// one coin per layout spot.
#[derive(Debug, Clone)]
pub struct StandardFactory {
    pub layout: LayoutSource,
    pub fox_seed: u64,
    pub floor_size: f32,
}

impl Default for StandardFactory {
    fn default() -> Self {
        Self {
            layout: LayoutSource::Default,
            fox_seed: 42,
            floor_size: 40.0,
        }
    }
}

impl StandardFactory {
    fn resolve_layout(&self) -> Result<PrizeLayout, WorldError> {
        Ok(match &self.layout {
            LayoutSource::Default => PrizeLayout::default(),
            LayoutSource::Inline(layout) => layout.clone(),
            LayoutSource::File(path) => {
                tracing::debug!(path = %path.display(), "loading prize layout");
                PrizeLayout::load(path)?
            }
        })
    }
}

impl EntityFactory for StandardFactory {
    fn build(&mut self, scene: &mut Scene) -> Result<EntitySet, WorldError> {
        let layout = self.resolve_layout()?;

        let floor = Floor::new(self.floor_size);
        scene.add(floor.id, SceneKind::Floor, floor.transform);
        let environment = Environment::default();
        scene.add(environment.id, SceneKind::Environment, Transform::default());

        let fox = Fox::new(Vec3::new(-4.0, 0.0, -4.0), self.fox_seed);
        scene.add(fox.id(), SceneKind::Creature, Transform::at(fox.position));
        let robot = Robot::new(Vec3::ZERO);
        scene.add(robot.id(), SceneKind::Player, Transform::at(robot.body().position));
        let camera = ThirdPersonCamera::default();
        scene.add(camera.id(), SceneKind::Camera, Transform::at(camera.position));

        let prizes = PrizeLoader::from_layout(&layout);
        for prize in prizes.prizes() {
            scene.add(prize.id(), SceneKind::Prize, Transform::at(prize.pivot_position()));
        }

        tracing::debug!(prizes = prizes.len(), "entities built");
        Ok(EntitySet {
            floor,
            environment,
            fox: Box::new(fox),
            robot: Box::new(robot),
            camera: Box::new(camera),
            prizes,
        })
    }
}
