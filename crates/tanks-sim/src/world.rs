//! Live entity collection.
//!
//! Insertion order is update and reap order. Ids are allocated sequentially,
//! so the collection is always sorted by id and lookups binary-search.

use tanks_core::types::EntityId;

use crate::entity::{Body, Entity, EntityCore, EntityKind, Tank};
use crate::physics::BodyMut;

#[derive(Debug, Default)]
pub struct World {
    entities: Vec<Entity>,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, name: &'static str, body: Option<Body>, kind: EntityKind) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.entities.push(Entity {
            core: EntityCore::new(id, name, body),
            kind,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.core.id).ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let i = self.index_of(id)?;
        Some(&mut self.entities[i])
    }

    pub fn tank(&self, id: EntityId) -> Option<&Tank> {
        self.get(id).and_then(Entity::as_tank)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.entities.iter_mut()
    }

    /// Keep only the entities for which `keep` returns true, in order.
    pub fn retain_mut(&mut self, keep: impl FnMut(&mut Entity) -> bool) {
        self.entities.retain_mut(keep);
    }

    /// Mutable views of every body for the physics integrator.
    pub fn bodies_mut(&mut self) -> Vec<BodyMut<'_>> {
        self.entities
            .iter_mut()
            .filter_map(|e| {
                let id = e.core.id;
                e.core.body.as_mut().map(|body| BodyMut { id, body })
            })
            .collect()
    }

    /// Drop everything and restart id allocation.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.next_id = 0;
    }
}
