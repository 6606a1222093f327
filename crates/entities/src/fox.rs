use glam::Vec3;
use prizehunt_common::EntityId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::Entity;

/// Wandering creature. Picks a new heading at random intervals and turns
/// back toward home when it strays past its leash.
#[derive(Debug, Clone)]
pub struct Fox {
    id: EntityId,
    pub position: Vec3,
    heading: f32,
    pub speed: f32,
    home: Vec3,
    pub leash: f32,
    turn_in: f32,
    rng: ChaCha8Rng,
}

impl Fox {
    pub fn new(home: Vec3, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let heading = rng.gen_range(0.0..std::f32::consts::TAU);
        let turn_in = rng.gen_range(1.0..4.0);
        Self {
            id: EntityId::new(),
            position: home,
            heading,
            speed: 1.5,
            home,
            leash: 8.0,
            turn_in,
            rng,
        }
    }

    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.heading.cos(), 0.0, self.heading.sin())
    }
}

impl Entity for Fox {
    fn id(&self) -> EntityId {
        self.id
    }

    fn update(&mut self, dt: f32) {
        self.turn_in -= dt;
        let offset = self.position - self.home;
        if offset.length() > self.leash {
            let back = -offset;
            self.heading = back.z.atan2(back.x);
        } else if self.turn_in <= 0.0 {
            self.heading = self.rng.gen_range(0.0..std::f32::consts::TAU);
            self.turn_in = self.rng.gen_range(1.0..4.0);
        }
        self.position += self.direction() * self.speed * dt;
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_path() {
        let mut a = Fox::new(Vec3::ZERO, 3);
        let mut b = Fox::new(Vec3::ZERO, 3);
        for _ in 0..500 {
            a.update(0.05);
            b.update(0.05);
        }
        assert_eq!(a.position, b.position);
    }

    #[test]
    fn stays_near_home() {
        let mut fox = Fox::new(Vec3::new(2.0, 0.0, 2.0), 11);
        for _ in 0..5000 {
            fox.update(0.05);
            let d = (fox.position - Vec3::new(2.0, 0.0, 2.0)).length();
            assert!(d < fox.leash + fox.speed);
        }
    }

    #[test]
    fn zero_dt_does_not_move() {
        let mut fox = Fox::new(Vec3::ZERO, 1);
        fox.update(0.0);
        assert_eq!(fox.position, Vec3::ZERO);
    }
}
