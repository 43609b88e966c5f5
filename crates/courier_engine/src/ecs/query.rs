//! Composition queries
//!
//! A [`Query`] names a set of required component kinds. Iteration is lazy:
//! it walks the dense entity list of the smallest required store and keeps
//! the entities whose signature contains every required kind. Because a
//! query borrows the world immutably, the stores cannot change while it is
//! alive, so every pass over it sees the same state.

use super::component::{ComponentKind, ComponentKinds};
use super::entity::Entity;
use super::world::World;

/// Restartable view over entities owning a set of component kinds
#[derive(Clone, Copy)]
pub struct Query<'w> {
    world: &'w World,
    required: ComponentKinds,
}

impl<'w> Query<'w> {
    pub(crate) fn new(world: &'w World, required: ComponentKinds) -> Self {
        Self { world, required }
    }

    /// Kinds every yielded entity owns
    pub fn required(&self) -> ComponentKinds {
        self.required
    }

    /// Start a fresh pass
    pub fn iter(&self) -> QueryIter<'w> {
        let candidates = match self.driving_kind() {
            Some(kind) => Candidates::Store(self.world.registry().entities_of(kind).iter()),
            None => Candidates::All(Box::new(self.world.entities())),
        };
        QueryIter {
            world: self.world,
            required: self.required,
            candidates,
        }
    }

    /// True when no entity matches
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Required kind with the fewest stored instances
    fn driving_kind(&self) -> Option<ComponentKind> {
        self.required
            .kinds()
            .min_by_key(|kind| self.world.registry().entities_of(*kind).len())
    }
}

impl<'w> IntoIterator for Query<'w> {
    type Item = Entity;
    type IntoIter = QueryIter<'w>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'w> IntoIterator for &Query<'w> {
    type Item = Entity;
    type IntoIter = QueryIter<'w>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

enum Candidates<'w> {
    Store(std::slice::Iter<'w, Entity>),
    All(Box<dyn Iterator<Item = Entity> + 'w>),
}

/// One pass over a [`Query`]
pub struct QueryIter<'w> {
    world: &'w World,
    required: ComponentKinds,
    candidates: Candidates<'w>,
}

impl Iterator for QueryIter<'_> {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        loop {
            let entity = match &mut self.candidates {
                Candidates::Store(iter) => *iter.next()?,
                Candidates::All(iter) => iter.next()?,
            };
            if self
                .world
                .signature(entity)
                .is_some_and(|signature| signature.contains(self.required))
            {
                return Some(entity);
            }
        }
    }
}
