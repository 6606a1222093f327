use glam::{Quat, Vec3};
use prizehunt_assets::PrizeLayout;
use prizehunt_common::{EntityId, Transform};

use crate::Prize;

/// Spinning, bobbing coin.
#[derive(Debug, Clone)]
pub struct Coin {
    id: EntityId,
    pub pivot: Transform,
    base_height: f32,
    elapsed: f32,
    pub spin_speed: f32,
    pub bob_height: f32,
    collected: bool,
}

impl Coin {
    pub fn new(position: Vec3) -> Self {
        Self {
            id: EntityId::new(),
            pivot: Transform::at(position),
            base_height: position.y,
            elapsed: 0.0,
            spin_speed: 2.0,
            bob_height: 0.1,
            collected: false,
        }
    }
}

impl Prize for Coin {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_collected(&self) -> bool {
        self.collected
    }

    fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        self.pivot.rotation = Quat::from_rotation_y(self.elapsed * self.spin_speed);
        self.pivot.position.y = self.base_height + (self.elapsed * 2.0).sin() * self.bob_height;
    }

    fn pivot_position(&self) -> Vec3 {
        self.pivot.position
    }

    fn collect(&mut self) {
        self.collected = true;
        self.pivot.scale = Vec3::ZERO;
        tracing::debug!(prize = %self.id.short(), "coin collected");
    }
}

/// Owns the active prizes, in placement order.
pub struct PrizeLoader {
    prizes: Vec<Box<dyn Prize>>,
    initial: usize,
}

impl PrizeLoader {
    pub fn new(prizes: Vec<Box<dyn Prize>>) -> Self {
        let initial = prizes.len();
        Self { prizes, initial }
    }

    /// One coin per layout spot.
    pub fn from_layout(layout: &PrizeLayout) -> Self {
        Self::new(
            layout
                .prizes
                .iter()
                .map(|spot| Box::new(Coin::new(spot.position)) as Box<dyn Prize>)
                .collect(),
        )
    }

    pub fn prizes(&self) -> &[Box<dyn Prize>] {
        &self.prizes
    }

    pub fn prizes_mut(&mut self) -> &mut [Box<dyn Prize>] {
        &mut self.prizes
    }

    /// Remove a prize from the active collection.
    pub fn remove(&mut self, id: EntityId) -> Option<Box<dyn Prize>> {
        let index = self.prizes.iter().position(|p| p.id() == id)?;
        Some(self.prizes.remove(index))
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    /// How many prizes the session started with.
    pub fn initial_count(&self) -> usize {
        self.initial
    }

    pub fn removed_count(&self) -> usize {
        self.initial - self.prizes.len()
    }
}

impl std::fmt::Debug for PrizeLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrizeLoader")
            .field("active", &self.prizes.len())
            .field("initial", &self.initial)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_collect_is_sticky() {
        let mut coin = Coin::new(Vec3::ZERO);
        assert!(!coin.is_collected());
        coin.collect();
        coin.update(1.0);
        assert!(coin.is_collected());
    }

    #[test]
    fn coin_bobs_around_base_height() {
        let mut coin = Coin::new(Vec3::new(0.0, 1.0, 0.0));
        for _ in 0..100 {
            coin.update(0.05);
            let y = coin.pivot_position().y;
            assert!((y - 1.0).abs() <= coin.bob_height + 1e-6);
        }
    }

    #[test]
    fn loader_builds_one_coin_per_spot() {
        let loader = PrizeLoader::from_layout(&PrizeLayout::default());
        assert_eq!(loader.len(), 14);
        assert_eq!(loader.initial_count(), 14);
    }

    #[test]
    fn remove_by_id() {
        let mut loader = PrizeLoader::from_layout(&PrizeLayout::ring(3, 1.0, 0.0));
        let id = loader.prizes()[1].id();
        assert!(loader.remove(id).is_some());
        assert!(loader.remove(id).is_none());
        assert_eq!(loader.len(), 2);
        assert_eq!(loader.removed_count(), 1);
    }
}
