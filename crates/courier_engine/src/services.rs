//! Collaborator contracts
//!
//! The simulation never owns renderer, particle or lighting resources. It
//! holds slotmap keys into collaborator arenas and talks to the owners
//! through the narrow traits below.

use crate::ecs::Entity;
use crate::events::EventQueue;
use crate::foundation::handles::{DrawableHandle, Key, LightHandle, SpawnerHandle};
use crate::foundation::math::Vec3;

/// Collaborator handle no longer referenced by any component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleasedResource {
    /// Renderer drawable from a `Graphics` component
    Drawable(DrawableHandle),
    /// Particle spawner from a `ParticleSpawner` component
    Spawner(SpawnerHandle),
    /// Light from a `PointLight` component
    Light(LightHandle),
}

impl ReleasedResource {
    /// Null handles reference nothing and are never released
    pub fn is_null(&self) -> bool {
        match self {
            Self::Drawable(handle) => handle.is_null(),
            Self::Spawner(handle) => handle.is_null(),
            Self::Light(handle) => handle.is_null(),
        }
    }
}

/// Particle collaborator
pub trait ParticleEmitter {
    /// Emit one burst from `spawner` on behalf of `entity`
    fn emit(&mut self, entity: Entity, spawner: SpawnerHandle);
}

/// Lighting collaborator
pub trait LightSink {
    /// Move `light` to the world-space `position`
    fn update_light(&mut self, entity: Entity, light: LightHandle, position: Vec3);
}

/// Owner of collaborator arenas
pub trait ResourceRelease {
    /// Free a handle no component references any more
    fn release(&mut self, resource: ReleasedResource);
}

/// Collaborator that ignores every call
///
/// Useful for headless runs and tests that only inspect component state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCollaborator;

impl ParticleEmitter for NullCollaborator {
    fn emit(&mut self, _entity: Entity, _spawner: SpawnerHandle) {}
}

impl LightSink for NullCollaborator {
    fn update_light(&mut self, _entity: Entity, _light: LightHandle, _position: Vec3) {}
}

impl ResourceRelease for NullCollaborator {
    fn release(&mut self, _resource: ReleasedResource) {}
}

/// Collaborators borrowed for the duration of one tick
pub struct TickServices<'a> {
    /// Particle emission
    pub particles: &'a mut dyn ParticleEmitter,
    /// Light placement
    pub lights: &'a mut dyn LightSink,
    /// Handle release
    pub resources: &'a mut dyn ResourceRelease,
    /// Gameplay events raised during the tick
    pub events: &'a mut EventQueue,
}

impl<'a> TickServices<'a> {
    /// Bundle the collaborators for one tick
    pub fn new(
        particles: &'a mut dyn ParticleEmitter,
        lights: &'a mut dyn LightSink,
        resources: &'a mut dyn ResourceRelease,
        events: &'a mut EventQueue,
    ) -> Self {
        Self {
            particles,
            lights,
            resources,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::handles::SlotMap;

    #[test]
    fn test_null_handles_are_not_released() {
        assert!(ReleasedResource::Drawable(DrawableHandle::default()).is_null());
        assert!(ReleasedResource::Light(LightHandle::default()).is_null());

        let mut arena: SlotMap<SpawnerHandle, ()> = SlotMap::with_key();
        let live = arena.insert(());
        assert!(!ReleasedResource::Spawner(live).is_null());
    }
}
