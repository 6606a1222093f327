use glam::Vec3;
use prizehunt_common::{EntityId, Transform};

/// Static ground plane.
#[derive(Debug, Clone)]
pub struct Floor {
    pub id: EntityId,
    pub transform: Transform,
    /// Side length of the square floor in world units.
    pub size: f32,
}

impl Floor {
    pub fn new(size: f32) -> Self {
        Self {
            id: EntityId::new(),
            transform: Transform::default(),
            size,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let half = self.size * 0.5;
        let local = point - self.transform.position;
        local.x.abs() <= half && local.z.abs() <= half
    }
}

/// Lighting rig and backdrop.
#[derive(Debug, Clone)]
pub struct Environment {
    pub id: EntityId,
    pub sun_direction: Vec3,
    pub sun_intensity: f32,
    pub ambient_intensity: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            id: EntityId::new(),
            sun_direction: Vec3::new(-0.5, -1.0, -0.3).normalize(),
            sun_intensity: 4.0,
            ambient_intensity: 0.4,
        }
    }
}
