use glam::{Mat4, Vec3};
use prizehunt_common::EntityId;

use crate::{CameraRig, smoothing};

/// Over-the-shoulder camera that trails the player at a fixed offset.
#[derive(Debug, Clone)]
pub struct ThirdPersonCamera {
    id: EntityId,
    pub position: Vec3,
    pub target: Vec3,
    pub offset: Vec3,
    /// How quickly the camera catches up with its desired position.
    pub follow_rate: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ThirdPersonCamera {
    fn default() -> Self {
        let offset = Vec3::new(0.0, 4.0, 8.0);
        Self {
            id: EntityId::new(),
            position: offset,
            target: Vec3::ZERO,
            offset,
            follow_rate: 5.0,
            fov: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl ThirdPersonCamera {
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl CameraRig for ThirdPersonCamera {
    fn id(&self) -> EntityId {
        self.id
    }

    fn update(&mut self, dt: f32, focus: Option<Vec3>) {
        let Some(focus) = focus else {
            return;
        };
        let k = smoothing(self.follow_rate, dt);
        self.position = self.position.lerp(focus + self.offset, k);
        self.target = self.target.lerp(focus, k);
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = ThirdPersonCamera::default();
        assert!(cam.position.y > 0.0);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn follows_focus() {
        let mut cam = ThirdPersonCamera::default();
        let focus = Vec3::new(10.0, 0.0, 0.0);
        for _ in 0..300 {
            cam.update(1.0 / 60.0, Some(focus));
        }
        assert!((cam.position - (focus + cam.offset)).length() < 0.01);
        assert!(cam.forward().x.abs() < 0.01);
    }

    #[test]
    fn no_focus_holds_still() {
        let mut cam = ThirdPersonCamera::default();
        let start = cam.position;
        cam.update(1.0, None);
        assert_eq!(cam.position, start);
    }
}
