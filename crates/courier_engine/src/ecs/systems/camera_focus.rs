//! Camera focus tracking

use log::trace;

use crate::ecs::component::ComponentKinds;
use crate::ecs::scheduler::SystemStage;
use crate::ecs::system::{System, SystemContext};
use crate::ecs::{Entity, World};

/// Writes each focus entity's camera target from its final position
///
/// Runs last so the target reflects movement and collision correction.
#[derive(Debug, Default)]
pub struct CameraFocusSystem {
    scratch: Vec<Entity>,
}

impl CameraFocusSystem {
    /// Create a camera focus system
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for CameraFocusSystem {
    fn name(&self) -> &'static str {
        "camera_focus"
    }

    fn stage(&self) -> SystemStage {
        SystemStage::CameraFocus
    }

    fn run(&mut self, world: &mut World, _context: &mut SystemContext<'_, '_>) {
        self.scratch.clear();
        self.scratch
            .extend(world.query(ComponentKinds::CAMERA_FOCUS | ComponentKinds::POSITION));

        let registry = world.registry_mut();
        for &entity in &self.scratch {
            let (Some(position), Some(focus)) = (
                registry.positions.get(entity),
                registry.camera_foci.get_mut(entity),
            ) else {
                continue;
            };
            focus.target = position.world_position() + focus.offset;
            trace!("CameraFocusSystem: {entity} target {:?}", focus.target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{CameraFocus, Position};
    use crate::ecs::systems::test_support::{run_once, Collaborators};
    use crate::foundation::math::{Mat4, Vec3};
    use approx::assert_relative_eq;

    #[test]
    fn test_target_is_world_position_plus_offset() {
        let mut world = World::new();
        let entity = world.create();
        let parent = Mat4::new_translation(&Vec3::new(0.0, 0.0, -5.0));
        world
            .attach(entity, Position::at(Vec3::new(1.0, 0.0, 0.0)).with_parent(parent))
            .unwrap();
        world.attach(entity, CameraFocus::new(Vec3::new(0.0, 3.0, 0.0))).unwrap();

        run_once(&mut CameraFocusSystem::new(), &mut world, &mut Collaborators::default(), 0.1, 0);

        assert_relative_eq!(
            world.get::<CameraFocus>(entity).unwrap().target,
            Vec3::new(1.0, 3.0, -5.0)
        );
    }

    #[test]
    fn test_focus_without_position_is_ignored() {
        let mut world = World::new();
        let entity = world.create();
        world.attach(entity, CameraFocus::new(Vec3::new(0.0, 3.0, 0.0))).unwrap();

        run_once(&mut CameraFocusSystem::new(), &mut world, &mut Collaborators::default(), 0.1, 0);
        assert_eq!(world.get::<CameraFocus>(entity).unwrap().target, Vec3::zeros());
    }
}
