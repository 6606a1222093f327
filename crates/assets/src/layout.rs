use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::AssetError;

/// Where a single prize sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrizeSpot {
    pub position: Vec3,
}

/// Placement of every prize in a session. Loaded as dynamic content once the
/// static assets are ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeLayout {
    pub prizes: Vec<PrizeSpot>,
}

impl PrizeLayout {
    /// Prizes evenly spaced on a horizontal ring.
    pub fn ring(count: usize, radius: f32, height: f32) -> Self {
        let prizes = (0..count)
            .map(|i| {
                let angle = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
                PrizeSpot {
                    position: Vec3::new(angle.cos() * radius, height, angle.sin() * radius),
                }
            })
            .collect();
        Self { prizes }
    }

    pub fn from_json(data: &str) -> Result<Self, AssetError> {
        let layout: Self = serde_json::from_str(data)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    fn validate(&self) -> Result<(), AssetError> {
        if self.prizes.is_empty() {
            return Err(AssetError::InvalidLayout("layout has no prizes".into()));
        }
        if let Some(i) = self.prizes.iter().position(|p| !p.position.is_finite()) {
            return Err(AssetError::InvalidLayout(format!(
                "prize {i} has a non-finite position"
            )));
        }
        Ok(())
    }
}

impl Default for PrizeLayout {
    /// Fourteen prizes, one per point needed to win.
    fn default() -> Self {
        Self::ring(14, 12.0, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_has_fourteen_prizes() {
        assert_eq!(PrizeLayout::default().len(), 14);
    }

    #[test]
    fn ring_places_prizes_on_radius() {
        let layout = PrizeLayout::ring(8, 5.0, 1.0);
        for spot in &layout.prizes {
            let flat = Vec3::new(spot.position.x, 0.0, spot.position.z);
            assert!((flat.length() - 5.0).abs() < 1e-4);
            assert_eq!(spot.position.y, 1.0);
        }
    }

    #[test]
    fn parses_json_layout() {
        let json = r#"{ "prizes": [ { "position": [1.0, 0.0, 2.0] } ] }"#;
        let layout = PrizeLayout::from_json(json).unwrap();
        assert_eq!(layout.prizes[0].position, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn rejects_empty_layout() {
        let json = r#"{ "prizes": [] }"#;
        assert!(matches!(
            PrizeLayout::from_json(json),
            Err(AssetError::InvalidLayout(_))
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            PrizeLayout::from_json("{ not json"),
            Err(AssetError::LayoutParse(_))
        ));
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let layout = PrizeLayout::ring(3, 2.0, 0.0);
        layout.save(tmp.path()).unwrap();

        let loaded = PrizeLayout::load(tmp.path()).unwrap();
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            PrizeLayout::load("/definitely/not/here.json"),
            Err(AssetError::Io(_))
        ));
    }
}
