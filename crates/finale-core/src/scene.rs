//! Registry of render layers attached to the scene.
//!
//! Subsystems attach a layer when they allocate render resources and detach it
//! when they dispose them. Detached ids are queued so the orchestrator can tell
//! the backend to free whatever GPU state it keeps per layer.

use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Points,
    Ring,
    Flash,
}

#[derive(Debug, Default)]
pub struct Scene {
    next_id: u64,
    layers: FnvHashMap<LayerId, LayerKind>,
    released: Vec<LayerId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, kind: LayerKind) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, kind);
        id
    }

    /// Returns false if the layer was not attached (already detached).
    pub fn detach(&mut self, id: LayerId) -> bool {
        if self.layers.remove(&id).is_some() {
            self.released.push(id);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    pub fn kind(&self, id: LayerId) -> Option<LayerKind> {
        self.layers.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn count_of(&self, kind: LayerKind) -> usize {
        self.layers.values().filter(|k| **k == kind).count()
    }

    /// Ids detached since the last drain.
    pub fn drain_released(&mut self) -> std::vec::Drain<'_, LayerId> {
        self.released.drain(..)
    }
}
