//! ECS World
//!
//! Owns entity identity, per-entity signatures and every component store.
//! Structural changes (create, destroy, attach, detach) take effect
//! immediately between ticks. While a tick is open they are validated at the
//! call site and recorded in a [`CommandBuffer`], then applied in issue
//! order by [`World::end_tick`].

use log::{debug, warn};

use super::commands::{Command, CommandBuffer};
use super::component::{Component, ComponentData, ComponentKind, ComponentKinds};
use super::entity::{Entity, EntityAllocator, SlotState};
use super::error::EcsError;
use super::query::Query;
use super::registry::ComponentRegistry;
use crate::services::ReleasedResource;

/// Entity manager and component storage
#[derive(Debug, Default)]
pub struct World {
    allocator: EntityAllocator,
    signatures: Vec<ComponentKinds>,
    registry: ComponentRegistry,
    commands: CommandBuffer,
    tick_open: bool,
    released: Vec<ReleasedResource>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity with no components.
    ///
    /// Inside a tick the handle is reserved: it accepts queued attaches but
    /// stays invisible to [`World::has`] and queries until the flush.
    ///
    /// # Panics
    ///
    /// When the world has handed out more than `u32::MAX` distinct slots.
    pub fn create(&mut self) -> Entity {
        let state = if self.tick_open {
            SlotState::Reserved
        } else {
            SlotState::Alive
        };
        let entity = self.allocator.allocate(state);

        let index = entity.index() as usize;
        if self.signatures.len() <= index {
            self.signatures.resize(index + 1, ComponentKinds::empty());
        }
        self.signatures[index] = ComponentKinds::empty();

        if self.tick_open {
            self.commands.push(Command::Spawn(entity));
            debug!("Reserved entity {entity}");
        } else {
            debug!("Created entity {entity}");
        }
        entity
    }

    /// Destroy an entity and every component it owns
    pub fn destroy(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.validate(entity)?;
        if self.tick_open {
            self.commands.push(Command::Despawn(entity));
        } else {
            self.apply_destroy(entity);
        }
        Ok(())
    }

    /// Attach a component, replacing any instance of the same kind
    pub fn attach(&mut self, entity: Entity, component: impl Into<ComponentData>) -> Result<(), EcsError> {
        self.validate(entity)?;
        let data = component.into();
        if self.tick_open {
            self.commands.push(Command::Attach(entity, data));
        } else {
            self.apply_attach(entity, data);
        }
        Ok(())
    }

    /// Attach the kind's default instance
    pub fn attach_default(&mut self, entity: Entity, kind: ComponentKind) -> Result<(), EcsError> {
        self.attach(entity, ComponentData::default_for(kind))
    }

    /// Detach a component kind; detaching an absent kind does nothing
    pub fn detach(&mut self, entity: Entity, kind: ComponentKind) -> Result<(), EcsError> {
        self.validate(entity)?;
        if self.tick_open {
            self.commands.push(Command::Detach(entity, kind));
        } else {
            self.apply_detach(entity, kind);
        }
        Ok(())
    }

    /// True when a live entity owns `kind`
    pub fn has(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.signature(entity)
            .is_some_and(|signature| signature.contains(kind.flag()))
    }

    /// Kinds owned by a live entity.
    ///
    /// `PositionParent` is read off the stored position, so editing
    /// [`Position::parent`](crate::ecs::components::Position) through
    /// [`World::get_mut`] is reflected immediately.
    pub fn signature(&self, entity: Entity) -> Option<ComponentKinds> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        let mut signature = self.signatures.get(entity.index() as usize).copied()?;
        if self
            .registry
            .positions
            .get(entity)
            .is_some_and(|position| position.parent.is_some())
        {
            signature.insert(ComponentKinds::POSITION_PARENT);
        }
        Some(signature)
    }

    /// True for created, not yet destroyed entities (reserved ones excluded)
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Lazy view over live entities owning every kind in `kinds`
    pub fn query(&self, kinds: impl Into<ComponentKinds>) -> Query<'_> {
        Query::new(self, kinds.into())
    }

    /// Every live entity, in slot order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.allocator.iter_alive()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.allocator.alive_count()
    }

    /// True when no entity is alive
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow a live entity's component
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        T::store(&self.registry).get(entity)
    }

    /// Mutably borrow a live entity's component
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        T::store_mut(&mut self.registry).get_mut(entity)
    }

    /// Like [`World::get`], reporting why the component is unavailable
    pub fn component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        if !self.allocator.is_alive(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        T::store(&self.registry)
            .get(entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                kind: T::KIND,
            })
    }

    /// Read access to every store at once
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Field access for systems; never changes which entities own what
    pub(crate) fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    /// Start buffering structural changes
    pub fn begin_tick(&mut self) {
        if self.tick_open {
            warn!("begin_tick called while a tick is already open");
        }
        self.tick_open = true;
    }

    /// Close the tick and apply buffered changes in issue order.
    ///
    /// Returns the number of commands applied.
    pub fn end_tick(&mut self) -> usize {
        self.tick_open = false;
        self.flush()
    }

    /// True between [`World::begin_tick`] and [`World::end_tick`]
    pub fn is_tick_open(&self) -> bool {
        self.tick_open
    }

    /// Structural changes waiting for the flush
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Take the collaborator handles released since the last call
    pub fn drain_released(&mut self) -> Vec<ReleasedResource> {
        std::mem::take(&mut self.released)
    }

    fn flush(&mut self) -> usize {
        let commands: Vec<Command> = self.commands.drain().collect();
        let mut applied = 0;
        for command in commands {
            let entity = command.entity();
            match command {
                Command::Spawn(entity) => {
                    if self.allocator.commit(entity) {
                        applied += 1;
                    } else {
                        warn!("Dropped stale spawn of {entity}");
                    }
                    continue;
                }
                _ if !self.allocator.is_alive(entity) => {
                    warn!("Dropped command for destroyed entity {entity}");
                    continue;
                }
                Command::Despawn(entity) => self.apply_destroy(entity),
                Command::Attach(entity, data) => self.apply_attach(entity, data),
                Command::Detach(entity, kind) => self.apply_detach(entity, kind),
            }
            applied += 1;
        }
        if applied > 0 {
            debug!("Flushed {applied} structural changes");
        }
        applied
    }

    /// Handles that are not free and not already queued for destruction
    fn validate(&self, entity: Entity) -> Result<(), EcsError> {
        let destroyed = self.allocator.state(entity) == SlotState::Free
            || (self.tick_open && self.commands.despawn_pending(entity));
        if destroyed {
            Err(EcsError::UnknownEntity(entity))
        } else {
            Ok(())
        }
    }

    fn apply_destroy(&mut self, entity: Entity) {
        for data in self.registry.remove_all(entity) {
            self.release(&data);
        }
        if let Some(signature) = self.signatures.get_mut(entity.index() as usize) {
            *signature = ComponentKinds::empty();
        }
        self.allocator.release(entity);
        debug!("Destroyed entity {entity}");
    }

    fn apply_attach(&mut self, entity: Entity, data: ComponentData) {
        let kind = data.kind();
        let added = data.signature();
        let incoming = collaborator_handle(&data);

        if let Some(replaced) = self.registry.insert(entity, data) {
            if collaborator_handle(&replaced) != incoming {
                self.release(&replaced);
            }
            debug!("Replaced {kind} on {entity}");
        } else {
            debug!("Attached {kind} on {entity}");
        }

        if let Some(signature) = self.signatures.get_mut(entity.index() as usize) {
            // The parent kind is derived from the position on every read.
            signature.insert(added.difference(ComponentKinds::POSITION_PARENT));
        }
    }

    fn apply_detach(&mut self, entity: Entity, kind: ComponentKind) {
        let Some(removed) = self.registry.remove(entity, kind) else {
            return;
        };
        if let Some(signature) = self.signatures.get_mut(entity.index() as usize) {
            signature.remove(kind.flag());
        }
        // Stripping the parent leaves the position (and nothing else) behind.
        if kind != ComponentKind::PositionParent {
            self.release(&removed);
        }
        debug!("Detached {kind} from {entity}");
    }

    fn release(&mut self, data: &ComponentData) {
        if let Some(resource) = collaborator_handle(data) {
            debug!("Releasing {resource:?}");
            self.released.push(resource);
        }
    }
}

/// Non-null collaborator handle referenced by a component instance
fn collaborator_handle(data: &ComponentData) -> Option<ReleasedResource> {
    let resource = match data {
        ComponentData::Graphics(graphics) => ReleasedResource::Drawable(graphics.drawable),
        ComponentData::ParticleSpawner(spawner) => ReleasedResource::Spawner(spawner.spawner),
        ComponentData::PointLight(light) => ReleasedResource::Light(light.light),
        _ => return None,
    };
    (!resource.is_null()).then_some(resource)
}
