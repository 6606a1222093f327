//! Asset bookkeeping: content-addressed ids, the ready gate, prize layouts.
//!
//! The world never touches file contents directly. It declares the asset
//! paths it needs and waits for the gate to report them all loaded.
//!
//! # Invariants
//! - The ready gate transitions `Pending -> Ready` exactly once.
//! - A `ReadySignal` is handed out at most once per gate.
//! - Asset ids depend only on the asset path.

mod gate;
mod layout;

pub use gate::{AssetReadyGate, GateState, ReadySignal};
pub use layout::{PrizeLayout, PrizeSpot};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content-addressed asset ID computed from the asset path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl AssetId {
    pub fn for_path(path: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(path.as_bytes());
        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        Self(u64::from_le_bytes(bytes))
    }
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset not declared: {0:?}")]
    Undeclared(AssetId),
    #[error("layout parse error: {0}")]
    LayoutParse(#[from] serde_json::Error),
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// The 3D models the scene needs before entity wrappers can be built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub models: Vec<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            models: vec![
                "/models/floor.glb".into(),
                "/models/environment.glb".into(),
                "/models/fox.glb".into(),
                "/models/robot.glb".into(),
                "/models/coin.glb".into(),
            ],
        }
    }
}

impl AssetManifest {
    /// Build a gate waiting on every model in the manifest.
    pub fn gate(&self) -> AssetReadyGate {
        let mut gate = AssetReadyGate::new();
        for path in &self.models {
            gate.declare(path);
        }
        gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_id_is_stable_per_path() {
        assert_eq!(
            AssetId::for_path("/models/fox.glb"),
            AssetId::for_path("/models/fox.glb")
        );
        assert_ne!(
            AssetId::for_path("/models/fox.glb"),
            AssetId::for_path("/models/robot.glb")
        );
    }

    #[test]
    fn manifest_gate_declares_every_model() {
        let manifest = AssetManifest::default();
        let gate = manifest.gate();
        assert_eq!(gate.declared(), manifest.models.len());
        assert_eq!(gate.state(), GateState::Pending);
    }
}
