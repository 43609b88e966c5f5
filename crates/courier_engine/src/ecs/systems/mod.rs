//! ECS Systems module
//!
//! One system per simulation concern. Each selects its entities with a
//! composition query, copies the matching handles into a scratch buffer and
//! then mutates the stores it needs through disjoint field borrows.

pub mod camera_focus;
pub mod collision;
pub mod delivery_zone;
pub mod movement;
pub mod particle_spawner;
pub mod point_light;

pub use camera_focus::CameraFocusSystem;
pub use collision::{CollisionSystem, Contact};
pub use delivery_zone::{DeliverableFilter, DeliveryZoneSystem};
pub use movement::MovementSystem;
pub use particle_spawner::ParticleSpawnerSystem;
pub use point_light::PointLightSystem;

#[cfg(test)]
pub(crate) mod test_support {
    //! Recording collaborators for system tests

    use crate::ecs::system::{System, SystemContext};
    use crate::ecs::{Entity, World};
    use crate::events::{EventQueue, GameplayEvent};
    use crate::foundation::handles::{LightHandle, SpawnerHandle};
    use crate::foundation::math::Vec3;
    use crate::services::{
        LightSink, ParticleEmitter, ReleasedResource, ResourceRelease, TickServices,
    };

    /// Remembers every collaborator call
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub emitted: Vec<(Entity, SpawnerHandle)>,
        pub lights: Vec<(Entity, LightHandle, Vec3)>,
        pub released: Vec<ReleasedResource>,
    }

    impl ParticleEmitter for Recorder {
        fn emit(&mut self, entity: Entity, spawner: SpawnerHandle) {
            self.emitted.push((entity, spawner));
        }
    }

    impl LightSink for Recorder {
        fn update_light(&mut self, entity: Entity, light: LightHandle, position: Vec3) {
            self.lights.push((entity, light, position));
        }
    }

    impl ResourceRelease for Recorder {
        fn release(&mut self, resource: ReleasedResource) {
            self.released.push(resource);
        }
    }

    /// Split recorder so one struct can back all three service slots
    #[derive(Debug, Default)]
    pub struct Collaborators {
        pub particles: Recorder,
        pub lights: Recorder,
        pub resources: Recorder,
        pub events: EventQueue,
    }

    impl Collaborators {
        pub fn services(&mut self) -> TickServices<'_> {
            TickServices::new(
                &mut self.particles,
                &mut self.lights,
                &mut self.resources,
                &mut self.events,
            )
        }

        pub fn events(&mut self) -> Vec<GameplayEvent> {
            self.events.dispatch()
        }
    }

    /// Run a single system pass inside an open tick
    pub fn run_once(
        system: &mut dyn System,
        world: &mut World,
        collaborators: &mut Collaborators,
        delta_time: f32,
        tick: u64,
    ) {
        let mut services = collaborators.services();
        let mut context = SystemContext {
            delta_time,
            tick,
            services: &mut services,
        };
        world.begin_tick();
        system.run(world, &mut context);
        world.end_tick();
    }
}
