//! Component registry
//!
//! Holds one [`ComponentStore`] per kind. The kind set is closed, so each
//! store is a named field: systems borrow disjoint stores at the same time
//! (e.g. movements mutably while reading collisions) without any runtime
//! borrow tracking.

use super::component::{ComponentData, ComponentKind};
use super::components::{
    BoundingBox, CameraFocus, Collision, DeliveryZone, Graphics, MeshCollision, Movement,
    ParticleSpawner, PointLight, Position,
};
use super::entity::Entity;
use super::storage::ComponentStore;

/// All component stores, one per kind
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    /// BoundingBox store
    pub bounding_boxes: ComponentStore<BoundingBox>,
    /// CameraFocus store
    pub camera_foci: ComponentStore<CameraFocus>,
    /// Collision store
    pub collisions: ComponentStore<Collision>,
    /// Graphics store
    pub graphics: ComponentStore<Graphics>,
    /// MeshCollision store
    pub mesh_collisions: ComponentStore<MeshCollision>,
    /// Movement store
    pub movements: ComponentStore<Movement>,
    /// ParticleSpawner store
    pub particle_spawners: ComponentStore<ParticleSpawner>,
    /// PointLight store
    pub point_lights: ComponentStore<PointLight>,
    /// Position store; also backs the PositionParent kind
    pub positions: ComponentStore<Position>,
    /// DeliveryZone store
    pub delivery_zones: ComponentStore<DeliveryZone>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert into the store matching the data's variant, returning the
    /// replaced instance
    pub fn insert(&mut self, entity: Entity, data: ComponentData) -> Option<ComponentData> {
        match data {
            ComponentData::BoundingBox(c) => self.bounding_boxes.insert(entity, c).map(Into::into),
            ComponentData::CameraFocus(c) => self.camera_foci.insert(entity, c).map(Into::into),
            ComponentData::Collision(c) => self.collisions.insert(entity, c).map(Into::into),
            ComponentData::Graphics(c) => self.graphics.insert(entity, c).map(Into::into),
            ComponentData::MeshCollision(c) => self.mesh_collisions.insert(entity, c).map(Into::into),
            ComponentData::Movement(c) => self.movements.insert(entity, c).map(Into::into),
            ComponentData::ParticleSpawner(c) => {
                self.particle_spawners.insert(entity, c).map(Into::into)
            }
            ComponentData::PointLight(c) => self.point_lights.insert(entity, c).map(Into::into),
            ComponentData::Position(c) => self.positions.insert(entity, c).map(Into::into),
            ComponentData::DeliveryZone(c) => self.delivery_zones.insert(entity, c).map(Into::into),
        }
    }

    /// Remove the entity's instance of `kind`.
    ///
    /// Removing `PositionParent` only strips the parent matrix; the returned
    /// data is the position as it was before.
    pub fn remove(&mut self, entity: Entity, kind: ComponentKind) -> Option<ComponentData> {
        match kind {
            ComponentKind::BoundingBox => self.bounding_boxes.remove(entity).map(Into::into),
            ComponentKind::CameraFocus => self.camera_foci.remove(entity).map(Into::into),
            ComponentKind::Collision => self.collisions.remove(entity).map(Into::into),
            ComponentKind::Graphics => self.graphics.remove(entity).map(Into::into),
            ComponentKind::MeshCollision => self.mesh_collisions.remove(entity).map(Into::into),
            ComponentKind::Movement => self.movements.remove(entity).map(Into::into),
            ComponentKind::ParticleSpawner => self.particle_spawners.remove(entity).map(Into::into),
            ComponentKind::PointLight => self.point_lights.remove(entity).map(Into::into),
            ComponentKind::Position => self.positions.remove(entity).map(Into::into),
            ComponentKind::PositionParent => {
                let position = self.positions.get_mut(entity)?;
                position.parent?;
                let before = position.clone();
                position.parent = None;
                Some(before.into())
            }
            ComponentKind::DeliveryZone => self.delivery_zones.remove(entity).map(Into::into),
        }
    }

    /// Remove every instance the entity owns
    pub fn remove_all(&mut self, entity: Entity) -> Vec<ComponentData> {
        ComponentKind::ALL
            .into_iter()
            .filter(|kind| *kind != ComponentKind::PositionParent)
            .filter_map(|kind| self.remove(entity, kind))
            .collect()
    }

    /// Entities owning `kind`, in the backing store's dense order.
    ///
    /// For `PositionParent` this is the whole position store; callers filter
    /// by signature.
    pub fn entities_of(&self, kind: ComponentKind) -> &[Entity] {
        match kind {
            ComponentKind::BoundingBox => self.bounding_boxes.entities(),
            ComponentKind::CameraFocus => self.camera_foci.entities(),
            ComponentKind::Collision => self.collisions.entities(),
            ComponentKind::Graphics => self.graphics.entities(),
            ComponentKind::MeshCollision => self.mesh_collisions.entities(),
            ComponentKind::Movement => self.movements.entities(),
            ComponentKind::ParticleSpawner => self.particle_spawners.entities(),
            ComponentKind::PointLight => self.point_lights.entities(),
            ComponentKind::Position | ComponentKind::PositionParent => self.positions.entities(),
            ComponentKind::DeliveryZone => self.delivery_zones.entities(),
        }
    }

    /// Total stored instances across every store
    pub fn total_len(&self) -> usize {
        ComponentKind::ALL
            .into_iter()
            .filter(|kind| *kind != ComponentKind::PositionParent)
            .map(|kind| self.entities_of(kind).len())
            .sum()
    }
}
