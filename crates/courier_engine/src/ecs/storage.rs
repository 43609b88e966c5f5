//! Sparse-set component storage
//!
//! One store per component kind. The sparse array is indexed by entity slot
//! and points into two parallel dense arrays, so membership checks are O(1)
//! and iteration walks contiguous memory.

use super::entity::Entity;

/// Dense storage for one component kind
#[derive(Debug, Clone)]
pub struct ComponentStore<T> {
    sparse: Vec<Option<u32>>,
    entities: Vec<Entity>,
    components: Vec<T>,
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ComponentStore<T> {
    /// Create an empty store
    pub const fn new() -> Self {
        Self {
            sparse: Vec::new(),
            entities: Vec::new(),
            components: Vec::new(),
        }
    }

    fn dense_index(&self, entity: Entity) -> Option<usize> {
        let dense = (*self.sparse.get(entity.index() as usize)?)? as usize;
        (self.entities[dense] == entity).then_some(dense)
    }

    /// Insert or overwrite, returning the replaced instance
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        if let Some(dense) = self.dense_index(entity) {
            return Some(std::mem::replace(&mut self.components[dense], component));
        }

        let slot = entity.index() as usize;
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, None);
        }
        // A stale generation may still occupy the slot; evict it first.
        if let Some(stale) = self.sparse[slot] {
            let stale_entity = self.entities[stale as usize];
            self.remove(stale_entity);
        }

        self.sparse[slot] = Some(self.entities.len() as u32);
        self.entities.push(entity);
        self.components.push(component);
        None
    }

    /// Remove and return the entity's instance
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let dense = self.dense_index(entity)?;
        self.sparse[entity.index() as usize] = None;

        let last = self.entities.len() - 1;
        if dense != last {
            let moved = self.entities[last];
            self.sparse[moved.index() as usize] = Some(dense as u32);
        }
        self.entities.swap_remove(dense);
        Some(self.components.swap_remove(dense))
    }

    /// Check whether the entity has an instance in this store
    pub fn contains(&self, entity: Entity) -> bool {
        self.dense_index(entity).is_some()
    }

    /// Borrow the entity's instance
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.dense_index(entity).map(|dense| &self.components[dense])
    }

    /// Mutably borrow the entity's instance
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.dense_index(entity)
            .map(move |dense| &mut self.components[dense])
    }

    /// Entities owning an instance, in dense order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of stored instances
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate `(entity, component)` in dense order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.components.iter())
    }

    /// Iterate `(entity, component)` mutably in dense order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.components.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(index: u32) -> Entity {
        Entity::new(index, 0)
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut store = ComponentStore::new();
        assert_eq!(store.insert(entity(3), "first"), None);
        assert_eq!(store.insert(entity(3), "second"), Some("first"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(entity(3)), Some(&"second"));
    }

    #[test]
    fn test_remove_keeps_sparse_links_valid() {
        let mut store = ComponentStore::new();
        for index in 0..4 {
            store.insert(entity(index), index * 10);
        }

        assert_eq!(store.remove(entity(1)), Some(10));
        assert!(!store.contains(entity(1)));
        for index in [0, 2, 3] {
            assert_eq!(store.get(entity(index)), Some(&(index * 10)));
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_stale_generation_is_not_visible() {
        let mut store = ComponentStore::new();
        store.insert(Entity::new(0, 0), 1.0_f32);

        let reused = Entity::new(0, 1);
        assert!(!store.contains(reused));
        store.insert(reused, 2.0);
        assert!(!store.contains(Entity::new(0, 0)));
        assert_eq!(store.get(reused), Some(&2.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_iter_mut_updates_values() {
        let mut store = ComponentStore::new();
        store.insert(entity(0), 1);
        store.insert(entity(5), 2);
        for (_, value) in store.iter_mut() {
            *value *= 10;
        }
        let mut values: Vec<i32> = store.iter().map(|(_, value)| *value).collect();
        values.sort_unstable();
        assert_eq!(values, vec![10, 20]);
    }
}
