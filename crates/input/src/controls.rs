use std::collections::BTreeSet;

use glam::Vec3;

use crate::Action;

/// Held movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

/// Keyboard state as polled by the host, plus an analog steer override
/// used by VR thumbsticks and scripted drivers.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    held: BTreeSet<Direction>,
    steer: Option<Vec3>,
    jump: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, dir: Direction) {
        self.held.insert(dir);
    }

    pub fn release(&mut self, dir: Direction) {
        self.held.remove(&dir);
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held.contains(&dir)
    }

    /// Apply a shared action. Non-movement actions are ignored here.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Steer(dir) if dir.length_squared() > 0.0 => self.steer = Some(*dir),
            Action::Steer(_) => self.steer = None,
            Action::Jump => self.jump = true,
            _ => {}
        }
    }

    /// Take and clear a pending jump request.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }

    /// Planar movement direction on the XZ plane, normalized or zero.
    ///
    /// Forward is -Z.
    pub fn movement_axis(&self) -> Vec3 {
        if let Some(steer) = self.steer {
            return Vec3::new(steer.x, 0.0, steer.z).normalize_or_zero();
        }
        let mut axis = Vec3::ZERO;
        if self.is_held(Direction::Forward) {
            axis.z -= 1.0;
        }
        if self.is_held(Direction::Backward) {
            axis.z += 1.0;
        }
        if self.is_held(Direction::Left) {
            axis.x -= 1.0;
        }
        if self.is_held(Direction::Right) {
            axis.x += 1.0;
        }
        axis.normalize_or_zero()
    }

    pub fn has_movement_input(&self) -> bool {
        self.jump || self.movement_axis() != Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keys_no_movement() {
        let c = Controls::new();
        assert_eq!(c.movement_axis(), Vec3::ZERO);
        assert!(!c.has_movement_input());
    }

    #[test]
    fn forward_is_negative_z() {
        let mut c = Controls::new();
        c.press(Direction::Forward);
        assert_eq!(c.movement_axis(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn diagonal_is_normalized() {
        let mut c = Controls::new();
        c.press(Direction::Forward);
        c.press(Direction::Right);
        assert!((c.movement_axis().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut c = Controls::new();
        c.press(Direction::Left);
        c.press(Direction::Right);
        assert_eq!(c.movement_axis(), Vec3::ZERO);
        c.release(Direction::Left);
        assert_eq!(c.movement_axis(), Vec3::X);
    }

    #[test]
    fn steer_overrides_keys() {
        let mut c = Controls::new();
        c.press(Direction::Forward);
        c.apply(&Action::Steer(Vec3::new(3.0, 5.0, 0.0)));
        assert_eq!(c.movement_axis(), Vec3::X);
        c.apply(&Action::Steer(Vec3::ZERO));
        assert_eq!(c.movement_axis(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn jump_is_consumed_once() {
        let mut c = Controls::new();
        c.apply(&Action::Jump);
        assert!(c.has_movement_input());
        assert!(c.take_jump());
        assert!(!c.take_jump());
    }
}
