//! Selection of entity ids that survives paging and filtering.

use hashlink::LinkedHashSet;

use crate::domain::{Entity, EntityId};

/// Selected entity ids, in the order they were picked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: LinkedHashSet<EntityId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Insert if absent, remove if present
    pub fn toggle(&mut self, id: EntityId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Header checkbox: clear the visible ids if all of them are selected,
    /// otherwise select every visible id. Ids off the page are untouched.
    pub fn toggle_all(&mut self, visible: &[EntityId]) {
        if visible.is_empty() {
            return;
        }

        if visible.iter().all(|id| self.ids.contains(id)) {
            for id in visible {
                self.ids.remove(id);
            }
        } else {
            for id in visible {
                if !self.ids.contains(id) {
                    self.ids.insert(id.clone());
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Raw ids, including ones that may no longer exist
    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.ids.iter()
    }

    /// Selected ids that still exist in `collection`, in selection order.
    ///
    /// Stale ids are skipped on read; the set itself is left alone.
    pub fn selected_in<T: Entity>(&self, collection: &[T]) -> Vec<EntityId> {
        if self.ids.is_empty() {
            return Vec::new();
        }
        let present: ahash::AHashSet<EntityId> = collection.iter().map(Entity::id).collect();
        self.ids
            .iter()
            .filter(|id| present.contains(*id))
            .cloned()
            .collect()
    }

    /// Drop ids that are not in `collection`
    pub fn prune<T: Entity>(&mut self, collection: &[T]) {
        let keep = self.selected_in(collection);
        self.ids = keep.into_iter().collect();
    }
}
