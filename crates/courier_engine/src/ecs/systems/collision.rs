//! Collision detection and resolution
//!
//! Broad phase: sort-and-sweep along x over world-space AABBs, then the
//! layer/mask filter and a full AABB overlap test.
//! Narrow phase: box/box uses the minimum penetration axis, box/mesh pushes
//! the box out along the deepest-penetrating triangle normal. Mesh/mesh
//! pairs are not resolved.
//!
//! Static colliders never move. A dynamic collider touching a static one is
//! pushed out the full depth; two dynamic colliders split the correction.
//! Velocity into the contact normal is removed.

use std::collections::HashMap;

use log::{trace, warn};

use crate::ecs::component::ComponentKinds;
use crate::ecs::components::Collision;
use crate::ecs::registry::ComponentRegistry;
use crate::ecs::scheduler::SystemStage;
use crate::ecs::system::{System, SystemContext};
use crate::ecs::{Entity, World};
use crate::foundation::math::{self, Vec3};
use crate::physics::collision::{Aabb, Penetration, WorldSpaceCollisionMesh};

/// Resolved contact between two colliders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// First collider of the pair
    pub entity_a: Entity,
    /// Second collider of the pair
    pub entity_b: Entity,
    /// Unit direction separating `entity_a` from `entity_b`
    pub normal: Vec3,
    /// Penetration depth before resolution
    pub depth: f32,
}

/// Narrow-phase shape of one collider for this tick
#[derive(Debug)]
enum Shape {
    Box,
    Mesh(WorldSpaceCollisionMesh),
}

#[derive(Debug)]
struct Collider {
    entity: Entity,
    flags: Collision,
    bounds: Aabb,
    shape: Shape,
}

/// Detects overlapping colliders and pushes them apart
#[derive(Debug, Default)]
pub struct CollisionSystem {
    scratch: Vec<Entity>,
    colliders: Vec<Collider>,
    contacts: Vec<Contact>,
    corrections: HashMap<Entity, Correction>,
}

impl CollisionSystem {
    /// Create a collision system
    pub fn new() -> Self {
        Self::default()
    }

    /// Contacts resolved during the last pass
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Build this tick's collider list, skipping malformed shapes
    fn gather(&mut self, registry: &ComponentRegistry) {
        self.colliders.clear();
        for &entity in &self.scratch {
            let (Some(flags), Some(position)) =
                (registry.collisions.get(entity), registry.positions.get(entity))
            else {
                continue;
            };
            let bounding_box = registry.bounding_boxes.get(entity);
            let mesh = registry.mesh_collisions.get(entity);

            if bounding_box.is_none() && mesh.is_none() {
                warn!("Skipping collider {entity}: no BoundingBox or MeshCollision");
                continue;
            }
            if bounding_box.is_some_and(|b| !b.is_valid()) {
                warn!("Skipping collider {entity}: malformed bounding box");
                continue;
            }
            if mesh.is_some_and(|m| !m.is_valid()) {
                warn!("Skipping collider {entity}: empty collision mesh");
                continue;
            }

            let world_position = position.world_position();
            if !math::is_finite(&world_position) {
                warn!("Skipping collider {entity}: non-finite position");
                continue;
            }

            let shape = match mesh {
                Some(mesh) => Shape::Mesh(mesh.mesh.to_world_space(&position.world_matrix())),
                None => Shape::Box,
            };
            let bounds = match (bounding_box, &shape) {
                (Some(bounding_box), _) => bounding_box.world_aabb(world_position),
                (None, Shape::Mesh(mesh)) => mesh.bounds,
                (None, Shape::Box) => continue,
            };

            self.colliders.push(Collider {
                entity,
                flags: flags.clone(),
                bounds,
                shape,
            });
        }
    }

    /// Sort-and-sweep along x, then narrow phase for surviving pairs
    fn detect(&mut self) {
        self.contacts.clear();
        self.colliders
            .sort_by(|a, b| a.bounds.min.x.total_cmp(&b.bounds.min.x));

        for (i, a) in self.colliders.iter().enumerate() {
            for b in &self.colliders[i + 1..] {
                if b.bounds.min.x > a.bounds.max.x {
                    break;
                }
                if a.flags.is_static && b.flags.is_static {
                    continue;
                }
                if !a.flags.accepts(&b.flags) || !a.bounds.intersects(&b.bounds) {
                    continue;
                }
                if let Some(hit) = narrow_phase(a, b) {
                    self.contacts.push(Contact {
                        entity_a: a.entity,
                        entity_b: b.entity,
                        normal: hit.normal,
                        depth: hit.depth,
                    });
                }
            }
        }
    }

    /// Contacts are measured against pre-resolution bounds, so corrections
    /// for one entity are merged per axis (largest push each way) rather
    /// than summed.
    fn resolve(&mut self, registry: &mut ComponentRegistry) {
        self.corrections.clear();
        for contact in &self.contacts {
            let static_a = is_static(registry, contact.entity_a);
            let static_b = is_static(registry, contact.entity_b);
            let (share_a, share_b) = match (static_a, static_b) {
                (false, true) => (1.0, 0.0),
                (true, false) => (0.0, 1.0),
                (false, false) => (0.5, 0.5),
                (true, true) => continue,
            };

            for (entity, normal, depth) in [
                (contact.entity_a, contact.normal, contact.depth * share_a),
                (contact.entity_b, -contact.normal, contact.depth * share_b),
            ] {
                if depth <= 0.0 {
                    continue;
                }
                self.corrections
                    .entry(entity)
                    .or_default()
                    .merge(normal * depth);
                cancel_velocity(registry, entity, normal);
            }
        }

        for (entity, correction) in &self.corrections {
            if let Some(position) = registry.positions.get_mut(*entity) {
                position.translate_world(correction.total());
            }
        }
    }
}

/// Per-axis extremes of the pushes applied to one entity this pass
#[derive(Debug)]
struct Correction {
    positive: Vec3,
    negative: Vec3,
}

impl Default for Correction {
    fn default() -> Self {
        Self {
            positive: Vec3::zeros(),
            negative: Vec3::zeros(),
        }
    }
}

impl Correction {
    fn merge(&mut self, push: Vec3) {
        self.positive = self.positive.sup(&push);
        self.negative = self.negative.inf(&push);
    }

    fn total(&self) -> Vec3 {
        self.positive + self.negative
    }
}

/// Penetration of `a` into `b`, normal pointing from `b` towards `a`
fn narrow_phase(a: &Collider, b: &Collider) -> Option<Penetration> {
    match (&a.shape, &b.shape) {
        (Shape::Box, Shape::Box) => a.bounds.penetration(&b.bounds),
        (Shape::Box, Shape::Mesh(mesh)) => mesh.penetration_of_box(&a.bounds),
        (Shape::Mesh(mesh), Shape::Box) => mesh.penetration_of_box(&b.bounds).map(|hit| Penetration {
            normal: -hit.normal,
            depth: hit.depth,
        }),
        (Shape::Mesh(_), Shape::Mesh(_)) => None,
    }
}

fn is_static(registry: &ComponentRegistry, entity: Entity) -> bool {
    registry
        .collisions
        .get(entity)
        .map_or(true, |collision| collision.is_static)
}

/// Remove the part of `entity`'s velocity driving against `normal`
fn cancel_velocity(registry: &mut ComponentRegistry, entity: Entity, normal: Vec3) {
    if let Some(movement) = registry.movements.get_mut(entity) {
        let into_surface = movement.velocity.dot(&normal);
        if into_surface < 0.0 {
            movement.velocity -= normal * into_surface;
        }
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn stage(&self) -> SystemStage {
        SystemStage::Collision
    }

    fn run(&mut self, world: &mut World, _context: &mut SystemContext<'_, '_>) {
        self.scratch.clear();
        self.scratch
            .extend(world.query(ComponentKinds::COLLISION | ComponentKinds::POSITION));

        self.gather(world.registry());
        self.detect();
        self.resolve(world.registry_mut());

        trace!(
            "CollisionSystem: {} colliders, {} contacts",
            self.colliders.len(),
            self.contacts.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{BoundingBox, MeshCollision, Movement, Position};
    use crate::ecs::systems::test_support::{run_once, Collaborators};
    use crate::physics::collision::CollisionMeshTemplate;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn spawn_box(world: &mut World, at: Vec3, collision: Collision) -> Entity {
        let entity = world.create();
        world.attach(entity, Position::at(at)).unwrap();
        world.attach(entity, BoundingBox::default()).unwrap();
        world.attach(entity, collision).unwrap();
        entity
    }

    fn run(system: &mut CollisionSystem, world: &mut World) {
        run_once(system, world, &mut Collaborators::default(), 0.1, 0);
    }

    #[test]
    fn test_dynamic_box_is_pushed_out_of_static_box() {
        let mut world = World::new();
        let wall = spawn_box(&mut world, Vec3::zeros(), Collision::fixed());
        let mover = spawn_box(&mut world, Vec3::new(0.8, 0.0, 0.0), Collision::dynamic());
        world.attach(mover, Movement::drifting(Vec3::new(-3.0, 1.0, 0.0))).unwrap();

        let mut system = CollisionSystem::new();
        run(&mut system, &mut world);

        assert_eq!(system.contacts().len(), 1);
        assert_eq!(world.get::<Position>(wall).unwrap().location(), Vec3::zeros());
        assert_relative_eq!(
            world.get::<Position>(mover).unwrap().location(),
            Vec3::new(1.0, 0.0, 0.0),
            epsilon = 1e-5
        );
        // Only the component driving into the wall is removed.
        assert_relative_eq!(
            world.get::<Movement>(mover).unwrap().velocity,
            Vec3::new(0.0, 1.0, 0.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_dynamic_pair_splits_correction() {
        let mut world = World::new();
        let a = spawn_box(&mut world, Vec3::zeros(), Collision::dynamic());
        let b = spawn_box(&mut world, Vec3::new(0.6, 0.0, 0.0), Collision::dynamic());

        run(&mut CollisionSystem::new(), &mut world);

        assert_relative_eq!(
            world.get::<Position>(a).unwrap().location(),
            Vec3::new(-0.2, 0.0, 0.0),
            epsilon = 1e-5
        );
        assert_relative_eq!(
            world.get::<Position>(b).unwrap().location(),
            Vec3::new(0.8, 0.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_layer_mask_filters_pairs() {
        let mut world = World::new();
        spawn_box(&mut world, Vec3::zeros(), Collision::dynamic().with_layers(0b01, 0b01));
        spawn_box(&mut world, Vec3::new(0.5, 0.0, 0.0), Collision::dynamic().with_layers(0b10, 0b10));

        let mut system = CollisionSystem::new();
        run(&mut system, &mut world);
        assert!(system.contacts().is_empty());
    }

    #[test]
    fn test_box_rests_on_static_ground_mesh() {
        let mut world = World::new();
        let ground = world.create();
        world.attach(ground, Position::default()).unwrap();
        world
            .attach(ground, MeshCollision::new(Arc::new(CollisionMeshTemplate::ground_quad(10.0, 10.0))))
            .unwrap();
        world.attach(ground, Collision::fixed()).unwrap();

        let crate_box = spawn_box(&mut world, Vec3::new(1.0, 0.3, 1.0), Collision::dynamic());
        world.attach(crate_box, Movement::drifting(Vec3::new(0.0, -2.0, 0.0))).unwrap();

        run(&mut CollisionSystem::new(), &mut world);

        assert_relative_eq!(
            world.get::<Position>(crate_box).unwrap().location(),
            Vec3::new(1.0, 0.5, 1.0),
            epsilon = 1e-5
        );
        assert_relative_eq!(world.get::<Movement>(crate_box).unwrap().velocity, Vec3::zeros());
    }

    #[test]
    fn test_box_across_two_tiles_is_lifted_once() {
        let mut world = World::new();
        spawn_box(&mut world, Vec3::zeros(), Collision::fixed());
        spawn_box(&mut world, Vec3::new(1.0, 0.0, 0.0), Collision::fixed());
        let player = spawn_box(&mut world, Vec3::new(0.5, 0.8, 0.0), Collision::dynamic());

        let mut system = CollisionSystem::new();
        run(&mut system, &mut world);

        assert_eq!(system.contacts().len(), 2);
        assert_relative_eq!(
            world.get::<Position>(player).unwrap().location(),
            Vec3::new(0.5, 1.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_collider_without_shape_is_skipped() {
        let mut world = World::new();
        let shapeless = world.create();
        world.attach(shapeless, Position::default()).unwrap();
        world.attach(shapeless, Collision::dynamic()).unwrap();
        spawn_box(&mut world, Vec3::zeros(), Collision::dynamic());

        let mut system = CollisionSystem::new();
        run(&mut system, &mut world);
        assert!(system.contacts().is_empty());
        assert_eq!(world.get::<Position>(shapeless).unwrap().location(), Vec3::zeros());
    }

    #[test]
    fn test_malformed_box_is_skipped() {
        let mut world = World::new();
        let broken = spawn_box(&mut world, Vec3::zeros(), Collision::dynamic());
        world
            .attach(broken, BoundingBox::new(Vec3::new(-1.0, 1.0, 1.0)))
            .unwrap();
        spawn_box(&mut world, Vec3::new(0.5, 0.0, 0.0), Collision::dynamic());

        let mut system = CollisionSystem::new();
        run(&mut system, &mut world);
        assert!(system.contacts().is_empty());
    }
}
