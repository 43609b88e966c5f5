//! Point light placement

use log::trace;

use crate::ecs::component::ComponentKinds;
use crate::ecs::scheduler::SystemStage;
use crate::ecs::system::{System, SystemContext};
use crate::ecs::World;

/// Pushes each light's world position to the lighting collaborator
///
/// Nothing is written back to the world.
#[derive(Debug, Default)]
pub struct PointLightSystem;

impl PointLightSystem {
    /// Create a point light system
    pub fn new() -> Self {
        Self
    }
}

impl System for PointLightSystem {
    fn name(&self) -> &'static str {
        "point_light"
    }

    fn stage(&self) -> SystemStage {
        SystemStage::PointLight
    }

    fn run(&mut self, world: &mut World, context: &mut SystemContext<'_, '_>) {
        let registry = world.registry();
        let mut updated = 0usize;
        for entity in &world.query(ComponentKinds::POINT_LIGHT | ComponentKinds::POSITION) {
            let (Some(light), Some(position)) = (
                registry.point_lights.get(entity),
                registry.positions.get(entity),
            ) else {
                continue;
            };
            let world_position = position.world_position() + light.pos_offset;
            context
                .services
                .lights
                .update_light(entity, light.light, world_position);
            updated += 1;
        }

        trace!("PointLightSystem: updated {updated} lights");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{PointLight, Position};
    use crate::ecs::systems::test_support::{run_once, Collaborators};
    use crate::foundation::handles::{LightHandle, SlotMap};
    use crate::foundation::math::Vec3;

    #[test]
    fn test_light_follows_entity() {
        let mut arena: SlotMap<LightHandle, ()> = SlotMap::with_key();
        let handle = arena.insert(());

        let mut world = World::new();
        let lamp = world.create();
        world.attach(lamp, Position::at(Vec3::new(2.0, 0.0, 0.0))).unwrap();
        world
            .attach(lamp, PointLight::new(handle, Vec3::new(0.0, 1.5, 0.0)))
            .unwrap();

        // Unpositioned lights are not pushed.
        let loose = world.create();
        world.attach(loose, PointLight::default()).unwrap();

        let mut collaborators = Collaborators::default();
        run_once(&mut PointLightSystem::new(), &mut world, &mut collaborators, 0.1, 0);

        assert_eq!(
            collaborators.lights.lights,
            vec![(lamp, handle, Vec3::new(2.0, 1.5, 0.0))]
        );
    }
}
