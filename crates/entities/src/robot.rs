use glam::Vec3;
use prizehunt_common::{Body, EntityId};
use prizehunt_input::Controls;

use crate::{Character, smoothing};

/// The player character: planar steering with inertia, a jump, and gravity.
#[derive(Debug, Clone)]
pub struct Robot {
    id: EntityId,
    body: Body,
    points: u32,
    pub max_speed: f32,
    /// How quickly planar velocity converges on the steering target.
    pub responsiveness: f32,
    pub jump_speed: f32,
    pub gravity: f32,
}

impl Robot {
    pub fn new(position: Vec3) -> Self {
        Self::with_body(Body::at(position))
    }

    pub fn with_body(body: Body) -> Self {
        Self {
            id: EntityId::new(),
            body,
            points: 0,
            max_speed: 6.0,
            responsiveness: 8.0,
            jump_speed: 5.0,
            gravity: 9.81,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn grounded(&self) -> bool {
        self.body.position.y <= 0.0
    }
}

impl Character for Robot {
    fn id(&self) -> EntityId {
        self.id
    }

    fn update(&mut self, dt: f32, controls: &mut Controls) {
        let target = controls.movement_axis() * self.max_speed;
        let k = smoothing(self.responsiveness, dt);
        let v = &mut self.body.velocity;
        v.x += (target.x - v.x) * k;
        v.z += (target.z - v.z) * k;

        if controls.take_jump() && self.grounded() {
            self.body.velocity.y = self.jump_speed;
        }
        if !self.grounded() || self.body.velocity.y > 0.0 {
            self.body.velocity.y -= self.gravity * dt;
        }

        self.body.position += self.body.velocity * dt;
        if self.body.position.y < 0.0 {
            self.body.position.y = 0.0;
            self.body.velocity.y = 0.0;
        }
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn points(&self) -> u32 {
        self.points
    }

    fn set_points(&mut self, points: u32) {
        self.points = points;
    }
}
