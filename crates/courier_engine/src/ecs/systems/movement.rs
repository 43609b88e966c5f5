//! Movement integration
//!
//! Semi-implicit Euler: velocity is advanced first and the new velocity
//! moves the entity. Parented positions integrate their local location.

use log::{trace, warn};

use crate::ecs::component::ComponentKinds;
use crate::ecs::scheduler::SystemStage;
use crate::ecs::system::{System, SystemContext};
use crate::ecs::{Entity, World};
use crate::foundation::math;

/// Integrates every movable, positioned entity
#[derive(Debug, Default)]
pub struct MovementSystem {
    scratch: Vec<Entity>,
}

impl MovementSystem {
    /// Create a movement system
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn stage(&self) -> SystemStage {
        SystemStage::Movement
    }

    fn run(&mut self, world: &mut World, context: &mut SystemContext<'_, '_>) {
        self.scratch.clear();
        self.scratch
            .extend(world.query(ComponentKinds::MOVEMENT | ComponentKinds::POSITION));

        let dt = context.delta_time;
        let registry = world.registry_mut();
        let mut moved = 0usize;

        for &entity in &self.scratch {
            if registry
                .collisions
                .get(entity)
                .is_some_and(|collision| collision.is_static)
            {
                continue;
            }
            let (Some(movement), Some(position)) = (
                registry.movements.get_mut(entity),
                registry.positions.get_mut(entity),
            ) else {
                continue;
            };

            if !math::is_finite(&movement.velocity) || !math::is_finite(&movement.effective_acceleration()) {
                warn!("Skipping entity {entity}: non-finite movement state");
                continue;
            }

            let displacement = movement.integrate(dt);
            position.transform.position += displacement;
            moved += 1;
        }

        trace!("MovementSystem: integrated {moved} entities over {dt}s");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Collision, Movement, Position};
    use crate::ecs::systems::test_support::{run_once, Collaborators};
    use crate::foundation::math::{Mat4, Vec3};
    use approx::assert_relative_eq;

    #[test]
    fn test_one_tick_of_gravity() {
        let mut world = World::new();
        let entity = world.create();
        world.attach(entity, Position::at(Vec3::new(1.0, 2.0, 3.0))).unwrap();
        world.attach(entity, Movement::default()).unwrap();

        let dt = 0.016;
        run_once(&mut MovementSystem::new(), &mut world, &mut Collaborators::default(), dt, 0);

        let velocity = world.get::<Movement>(entity).unwrap().velocity;
        assert_relative_eq!(velocity, Vec3::new(0.0, -9.8 * dt, 0.0), epsilon = 1e-6);
        assert_relative_eq!(
            world.get::<Position>(entity).unwrap().location(),
            Vec3::new(1.0, 2.0, 3.0) + velocity * dt,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_static_colliders_do_not_move() {
        let mut world = World::new();
        let wall = world.create();
        world.attach(wall, Position::default()).unwrap();
        world.attach(wall, Movement::drifting(Vec3::new(1.0, 0.0, 0.0))).unwrap();
        world.attach(wall, Collision::fixed()).unwrap();

        run_once(&mut MovementSystem::new(), &mut world, &mut Collaborators::default(), 1.0, 0);
        assert_eq!(world.get::<Position>(wall).unwrap().location(), Vec3::zeros());
    }

    #[test]
    fn test_parented_position_integrates_local_location() {
        let mut world = World::new();
        let entity = world.create();
        let parent = Mat4::new_translation(&Vec3::new(0.0, 10.0, 0.0));
        world.attach(entity, Position::default().with_parent(parent)).unwrap();
        world.attach(entity, Movement::drifting(Vec3::new(2.0, 0.0, 0.0))).unwrap();

        run_once(&mut MovementSystem::new(), &mut world, &mut Collaborators::default(), 0.5, 0);

        let position = world.get::<Position>(entity).unwrap();
        assert_relative_eq!(position.location(), Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(position.world_position(), Vec3::new(1.0, 10.0, 0.0));
    }

    #[test]
    fn test_non_finite_velocity_is_skipped() {
        let mut world = World::new();
        let entity = world.create();
        world.attach(entity, Position::default()).unwrap();
        world.attach(entity, Movement::drifting(Vec3::new(f32::NAN, 0.0, 0.0))).unwrap();

        run_once(&mut MovementSystem::new(), &mut world, &mut Collaborators::default(), 1.0, 0);
        assert_eq!(world.get::<Position>(entity).unwrap().location(), Vec3::zeros());
    }
}
