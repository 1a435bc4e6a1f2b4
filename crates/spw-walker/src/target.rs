//! Weak look-target handles.
//!
//! A walker never owns the object it looks at; it stores a `TargetId` and
//! resolves it through a `TargetRegistry` at evaluation time. A dangling id
//! is reported as `MissingTarget`, never dereferenced.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use spw_math::Point3;

new_key_type! {
    pub struct TargetId;
}

/// Registry of world-space look-target positions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetRegistry {
    targets: SlotMap<TargetId, Point3>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self {
            targets: SlotMap::with_key(),
        }
    }

    pub fn insert(&mut self, position: Point3) -> TargetId {
        self.targets.insert(position)
    }

    pub fn get(&self, id: TargetId) -> Option<Point3> {
        self.targets.get(id).copied()
    }

    /// Update a target's position; returns false if the id is stale.
    pub fn set(&mut self, id: TargetId, position: Point3) -> bool {
        if let Some(slot) = self.targets.get_mut(id) {
            *slot = position;
            true
        } else {
            false
        }
    }

    pub fn remove(&mut self, id: TargetId) -> Option<Point3> {
        self.targets.remove(id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spw_math::DVec3;

    #[test]
    fn test_insert_get_remove() {
        let mut registry = TargetRegistry::new();
        let id = registry.insert(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(registry.get(id), Some(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(registry.remove(id), Some(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(registry.get(id), None);
    }

    #[test]
    fn test_stale_id_after_removal() {
        let mut registry = TargetRegistry::new();
        let id = registry.insert(DVec3::ZERO);
        registry.remove(id);
        assert!(!registry.set(id, DVec3::ONE));
        assert_eq!(registry.get(id), None);
    }
}
