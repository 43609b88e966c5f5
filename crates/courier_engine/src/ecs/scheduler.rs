//! Tick scheduling
//!
//! Deterministic, single-threaded execution in a fixed order:
//! Movement → Collision → DeliveryZone → ParticleSpawner → PointLight →
//! CameraFocus. Structural changes made during the tick are flushed after
//! the last stage, then released handles and gameplay events are handed to
//! the collaborators.

use log::{debug, trace, warn};

use super::system::{System, SystemContext};
use super::systems::{
    CameraFocusSystem, CollisionSystem, DeliveryZoneSystem, MovementSystem, ParticleSpawnerSystem,
    PointLightSystem,
};
use super::world::World;
use crate::config::{EngineConfig, SimulationConfig};
use crate::events::GameplayEvent;
use crate::services::TickServices;

/// System execution stages with explicit ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SystemStage {
    /// Velocity and position integration
    Movement = 0,
    /// Overlap detection and push-out
    Collision = 1,
    /// Delivery triggers on corrected positions
    DeliveryZone = 2,
    /// Particle emission countdowns
    ParticleSpawner = 3,
    /// Light placement
    PointLight = 4,
    /// Camera target, from final positions
    CameraFocus = 5,
}

/// Summary of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Index of the tick, starting at zero
    pub tick: u64,
    /// Step actually simulated after clamping
    pub delta_time: f32,
    /// Deferred structural changes applied at the flush
    pub commands_applied: usize,
    /// Collaborator handles handed to `ResourceRelease`
    pub resources_released: usize,
    /// Gameplay events dispatched at the end of the tick
    pub events: Vec<GameplayEvent>,
}

/// Owns every system and runs them in [`Scheduler::ORDER`]
#[derive(Debug)]
pub struct Scheduler {
    config: SimulationConfig,
    tick: u64,
    movement: MovementSystem,
    collision: CollisionSystem,
    delivery_zones: DeliveryZoneSystem,
    particle_spawners: ParticleSpawnerSystem,
    point_lights: PointLightSystem,
    camera_focus: CameraFocusSystem,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Scheduler {
    /// Stage order of every tick
    pub const ORDER: [SystemStage; 6] = [
        SystemStage::Movement,
        SystemStage::Collision,
        SystemStage::DeliveryZone,
        SystemStage::ParticleSpawner,
        SystemStage::PointLight,
        SystemStage::CameraFocus,
    ];

    /// Scheduler with default systems
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            tick: 0,
            movement: MovementSystem::new(),
            collision: CollisionSystem::new(),
            delivery_zones: DeliveryZoneSystem::new(),
            particle_spawners: ParticleSpawnerSystem::new(),
            point_lights: PointLightSystem::new(),
            camera_focus: CameraFocusSystem::new(),
        }
    }

    /// Scheduler configured from the engine config
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.simulation.clone())
    }

    /// Builder pattern: replace the delivery zone system
    pub fn with_delivery_zones(mut self, system: DeliveryZoneSystem) -> Self {
        self.delivery_zones = system;
        self
    }

    /// Collision system, for inspecting last tick's contacts
    pub fn collision(&self) -> &CollisionSystem {
        &self.collision
    }

    /// Delivery zone system, for swapping the actor filter
    pub fn delivery_zones_mut(&mut self) -> &mut DeliveryZoneSystem {
        &mut self.delivery_zones
    }

    /// Ticks completed so far
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Stepping configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Clamp a frame time into `[0, max_step]`; non-finite input becomes 0
    pub fn clamp_step(&self, delta_time: f32) -> f32 {
        if !delta_time.is_finite() {
            warn!("Non-finite tick duration {delta_time}, simulating 0s");
            return 0.0;
        }
        delta_time.clamp(0.0, self.config.max_step.max(0.0))
    }

    /// Run one tick over `world`
    pub fn tick(&mut self, world: &mut World, delta_time: f32, services: &mut TickServices<'_>) -> TickReport {
        let delta_time = self.clamp_step(delta_time);
        let tick = self.tick;

        world.begin_tick();
        {
            let mut context = SystemContext {
                delta_time,
                tick,
                services: &mut *services,
            };
            for stage in Self::ORDER {
                let system = self.system_mut(stage);
                trace!("Tick {tick}: running {}", system.name());
                system.run(world, &mut context);
            }
        }
        let commands_applied = world.end_tick();

        let released = world.drain_released();
        let resources_released = released.len();
        for resource in released {
            services.resources.release(resource);
        }

        let events = services.events.dispatch();
        self.tick += 1;

        debug!(
            "Tick {tick} done: dt={delta_time}, {commands_applied} commands, \
             {resources_released} released, {} events",
            events.len()
        );

        TickReport {
            tick,
            delta_time,
            commands_applied,
            resources_released,
            events,
        }
    }

    fn system_mut(&mut self, stage: SystemStage) -> &mut dyn System {
        match stage {
            SystemStage::Movement => &mut self.movement,
            SystemStage::Collision => &mut self.collision,
            SystemStage::DeliveryZone => &mut self.delivery_zones,
            SystemStage::ParticleSpawner => &mut self.particle_spawners,
            SystemStage::PointLight => &mut self.point_lights,
            SystemStage::CameraFocus => &mut self.camera_focus,
        }
    }
}
