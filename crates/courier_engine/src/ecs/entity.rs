//! Entity handles and allocation

use std::fmt;

/// Entity identifier
///
/// A slot index plus the generation of that slot. Destroying an entity bumps
/// the slot generation, so a stale copy of the handle never aliases the
/// entity that later reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index, used by the component stores' sparse arrays
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot at the time this handle was issued
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Liveness of an allocator slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotState {
    Free,
    /// Handed out during a tick, becomes `Alive` at the flush
    Reserved,
    Alive,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    state: SlotState,
}

/// Generational index allocator with slot reuse
#[derive(Debug, Default)]
pub(crate) struct EntityAllocator {
    slots: Vec<Slot>,
    free: Vec<u32>,
    alive: usize,
}

impl EntityAllocator {
    /// # Panics
    ///
    /// When more than `u32::MAX` slots have been allocated.
    pub fn allocate(&mut self, state: SlotState) -> Entity {
        debug_assert_ne!(state, SlotState::Free);
        if state == SlotState::Alive {
            self.alive += 1;
        }
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.state = state;
            return Entity::new(index, slot.generation);
        }
        let index = u32::try_from(self.slots.len()).expect("entity index space exhausted");
        self.slots.push(Slot { generation: 0, state });
        Entity::new(index, 0)
    }

    pub fn state(&self, entity: Entity) -> SlotState {
        match self.slots.get(entity.index as usize) {
            Some(slot) if slot.generation == entity.generation => slot.state,
            _ => SlotState::Free,
        }
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.state(entity) == SlotState::Alive
    }

    /// Promote a reserved slot to alive
    pub fn commit(&mut self, entity: Entity) -> bool {
        match self.slots.get_mut(entity.index as usize) {
            Some(slot) if slot.generation == entity.generation && slot.state == SlotState::Reserved => {
                slot.state = SlotState::Alive;
                self.alive += 1;
                true
            }
            _ => false,
        }
    }

    /// Free the slot and bump its generation
    pub fn release(&mut self, entity: Entity) -> bool {
        match self.slots.get_mut(entity.index as usize) {
            Some(slot) if slot.generation == entity.generation && slot.state != SlotState::Free => {
                if slot.state == SlotState::Alive {
                    self.alive -= 1;
                }
                slot.state = SlotState::Free;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(entity.index);
                true
            }
            _ => false,
        }
    }

    pub fn alive_count(&self) -> usize {
        self.alive
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            (slot.state == SlotState::Alive).then(|| Entity::new(index as u32, slot.generation))
        })
    }
}
