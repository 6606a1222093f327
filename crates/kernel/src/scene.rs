use glam::Vec3;
use prizehunt_common::{EntityId, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a scene object represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKind {
    Floor,
    Environment,
    Creature,
    Player,
    Camera,
    Prize,
}

/// A placed object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub kind: SceneKind,
    pub transform: Transform,
}

/// An event record produced by every mutation to the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneEvent {
    Added {
        id: EntityId,
        kind: SceneKind,
        transform: Transform,
    },
    /// Carries the removed object's data.
    Removed {
        id: EntityId,
        kind: SceneKind,
        transform: Transform,
    },
    Moved {
        id: EntityId,
        old: Transform,
        new: Transform,
    },
}

/// Registry of everything placed in the 3D scene.
///
/// BTreeMap keeps iteration deterministic. The event log lets a renderer or
/// recorder follow along without polling.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: BTreeMap<EntityId, SceneObject>,
    events: Vec<SceneEvent>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an object under an existing id (entity wrappers bring their own).
    pub fn add(&mut self, id: EntityId, kind: SceneKind, transform: Transform) {
        self.objects.insert(id, SceneObject { kind, transform });
        self.events.push(SceneEvent::Added {
            id,
            kind,
            transform,
        });
    }

    /// Remove an object. Returns its data if it existed.
    pub fn remove(&mut self, id: EntityId) -> Option<SceneObject> {
        let removed = self.objects.remove(&id);
        if let Some(ref obj) = removed {
            self.events.push(SceneEvent::Removed {
                id,
                kind: obj.kind,
                transform: obj.transform,
            });
        }
        removed
    }

    /// Replace an object's transform. Logs `Moved` only when it changed.
    pub fn set_transform(&mut self, id: EntityId, new: Transform) -> bool {
        let Some(obj) = self.objects.get_mut(&id) else {
            return false;
        };
        let old = obj.transform;
        if old != new {
            obj.transform = new;
            self.events.push(SceneEvent::Moved { id, old, new });
        }
        true
    }

    /// Move an object to `position`, keeping its rotation and scale.
    pub fn move_to(&mut self, id: EntityId, position: Vec3) -> bool {
        let Some(obj) = self.objects.get(&id) else {
            return false;
        };
        let new = Transform {
            position,
            ..obj.transform
        };
        self.set_transform(id, new)
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects of one kind.
    pub fn count(&self, kind: SceneKind) -> usize {
        self.objects.values().filter(|o| o.kind == kind).count()
    }

    pub fn objects(&self) -> &BTreeMap<EntityId, SceneObject> {
        &self.objects
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}
