use std::collections::BTreeSet;

use crate::{AssetError, AssetId};

/// Lifecycle of the ready gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Pending,
    Ready,
}

/// Proof that the gate fired. Not `Clone`: there is exactly one per gate.
#[derive(Debug, PartialEq, Eq)]
pub struct ReadySignal {
    _private: (),
}

/// One-shot gate that opens once every declared asset has loaded.
#[derive(Debug, Clone)]
pub struct AssetReadyGate {
    declared: BTreeSet<AssetId>,
    loaded: BTreeSet<AssetId>,
    state: GateState,
    signalled: bool,
}

impl AssetReadyGate {
    pub fn new() -> Self {
        Self {
            declared: BTreeSet::new(),
            loaded: BTreeSet::new(),
            state: GateState::Pending,
            signalled: false,
        }
    }

    /// Declare an asset the gate must wait for. Ignored once ready.
    pub fn declare(&mut self, path: &str) -> AssetId {
        let id = AssetId::for_path(path);
        if self.state == GateState::Pending {
            self.declared.insert(id);
        }
        id
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn declared(&self) -> usize {
        self.declared.len()
    }

    pub fn loaded(&self) -> usize {
        self.loaded.len()
    }

    /// Record an asset as loaded. Returns the signal if this call opened the gate.
    ///
    /// Reporting the same asset twice, or any asset after the gate fired, is a no-op.
    pub fn mark_loaded(&mut self, id: AssetId) -> Result<Option<ReadySignal>, AssetError> {
        if !self.declared.contains(&id) {
            return Err(AssetError::Undeclared(id));
        }
        if self.loaded.insert(id) {
            tracing::debug!(
                ?id,
                loaded = self.loaded.len(),
                declared = self.declared.len(),
                "asset loaded"
            );
        }
        Ok(self.poll())
    }

    /// Hand out the signal if every declared asset is loaded and it has not
    /// been handed out yet. A gate with nothing declared opens on first poll.
    pub fn poll(&mut self) -> Option<ReadySignal> {
        if self.signalled || self.loaded.len() < self.declared.len() {
            return None;
        }
        self.state = GateState::Ready;
        self.signalled = true;
        tracing::info!(assets = self.declared.len(), "assets ready");
        Some(ReadySignal { _private: () })
    }
}

impl Default for AssetReadyGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_after_last_asset() {
        let mut gate = AssetReadyGate::new();
        let a = gate.declare("/models/a.glb");
        let b = gate.declare("/models/b.glb");

        assert!(gate.mark_loaded(a).unwrap().is_none());
        assert_eq!(gate.state(), GateState::Pending);
        assert!(gate.mark_loaded(b).unwrap().is_some());
        assert_eq!(gate.state(), GateState::Ready);
    }

    #[test]
    fn fires_only_once() {
        let mut gate = AssetReadyGate::new();
        let a = gate.declare("/models/a.glb");
        assert!(gate.mark_loaded(a).unwrap().is_some());
        assert!(gate.mark_loaded(a).unwrap().is_none());
        assert!(gate.poll().is_none());
    }

    #[test]
    fn duplicate_load_does_not_open_early() {
        let mut gate = AssetReadyGate::new();
        let a = gate.declare("/models/a.glb");
        gate.declare("/models/b.glb");
        assert!(gate.mark_loaded(a).unwrap().is_none());
        assert!(gate.mark_loaded(a).unwrap().is_none());
        assert_eq!(gate.loaded(), 1);
    }

    #[test]
    fn empty_gate_opens_on_poll() {
        let mut gate = AssetReadyGate::new();
        assert!(gate.poll().is_some());
        assert!(gate.poll().is_none());
    }

    #[test]
    fn undeclared_asset_is_an_error() {
        let mut gate = AssetReadyGate::new();
        gate.declare("/models/a.glb");
        let stray = AssetId::for_path("/models/stray.glb");
        assert!(matches!(
            gate.mark_loaded(stray),
            Err(AssetError::Undeclared(_))
        ));
    }
}
