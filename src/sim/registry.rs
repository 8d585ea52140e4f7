//! Live entity registry
//!
//! Entities are kept sorted by id. Ids are assigned monotonically, so id order
//! is also insertion order.

use serde::{Deserialize, Serialize};

use super::state::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    entities: Vec<Entity>,
    capacity: usize,
}

impl Registry {
    pub fn new(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entity. An id already present replaces nothing and is dropped.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if self.entities.last().is_none_or(|last| last.id < entity.id) {
            self.entities.push(entity);
            return true;
        }
        match self.position(entity.id) {
            Ok(_) => false,
            Err(i) => {
                self.entities.insert(i, entity);
                true
            }
        }
    }

    /// Flag an entity for destruction. Returns true only on the false→true edge.
    pub fn mark_pending(&mut self, id: u32) -> bool {
        match self.get_mut(id) {
            Some(e) if !e.pending_destruction => {
                e.pending_destruction = true;
                true
            }
            _ => false,
        }
    }

    /// Drop the given ids, ignoring any already gone. Returns the ids removed.
    pub fn remove_settled(&mut self, ids: &[u32]) -> Vec<u32> {
        let mut removed = Vec::with_capacity(ids.len());
        self.entities.retain(|e| {
            if ids.contains(&e.id) {
                removed.push(e.id);
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.position(id).ok().map(|i| &self.entities[i])
    }

    fn get_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.position(id).ok().map(|i| &mut self.entities[i])
    }

    fn position(&self, id: u32) -> Result<usize, usize> {
        self.entities.binary_search_by_key(&id, |e| e.id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn is_at_capacity(&self) -> bool {
        self.entities.len() >= self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }
}
