//! Particle spawner countdowns

use log::{trace, warn};

use crate::ecs::component::ComponentKinds;
use crate::ecs::scheduler::SystemStage;
use crate::ecs::system::{System, SystemContext};
use crate::ecs::{Entity, World};

/// Counts spawners down and asks the particle collaborator to emit
#[derive(Debug, Default)]
pub struct ParticleSpawnerSystem {
    scratch: Vec<Entity>,
}

impl ParticleSpawnerSystem {
    /// Create a particle spawner system
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for ParticleSpawnerSystem {
    fn name(&self) -> &'static str {
        "particle_spawner"
    }

    fn stage(&self) -> SystemStage {
        SystemStage::ParticleSpawner
    }

    fn run(&mut self, world: &mut World, context: &mut SystemContext<'_, '_>) {
        self.scratch.clear();
        self.scratch.extend(world.query(ComponentKinds::PARTICLE_SPAWNER));

        let registry = world.registry_mut();
        let mut emitted = 0usize;
        for &entity in &self.scratch {
            let Some(spawner) = registry.particle_spawners.get_mut(entity) else {
                continue;
            };
            if !spawner.is_valid() {
                warn!(
                    "Skipping particle spawner on {entity}: invalid lifetime {}",
                    spawner.lifetime
                );
                continue;
            }
            if spawner.tick(context.delta_time) {
                context.services.particles.emit(entity, spawner.spawner);
                emitted += 1;
            }
        }

        trace!("ParticleSpawnerSystem: {emitted} emissions");
    }
}
