//! Headless Delivery Demo
//!
//! Builds a small delivery scene and runs the simulation at a fixed 60 Hz:
//! - A courier drives across a ground mesh towards a drop-off zone
//! - A crate blocks the way and is shoved aside by the collision system
//! - The courier carries a headlight, an exhaust spawner and the camera
//!
//! Usage: `delivery_demo [config.toml|config.ron]`

use std::sync::Arc;

use courier_engine::config::ConfigError;
use courier_engine::ecs::components::{
    BoundingBox, CameraFocus, Collision, DeliveryZone, Graphics, MeshCollision, Movement,
    ParticleSpawner, PointLight, Position,
};
use courier_engine::ecs::systems::DeliveryZoneSystem;
use courier_engine::ecs::{EcsError, Entity};
use courier_engine::foundation::handles::{DrawableHandle, LightHandle, SlotMap, SpawnerHandle};
use courier_engine::foundation::logging;
use courier_engine::physics::CollisionMeshTemplate;
use courier_engine::prelude::*;

const TICK_RATE: f32 = 60.0;
const MAX_TICKS: u64 = 60 * 30;

const COURIER_START: [f32; 3] = [-20.0, 0.5, 0.0];
const COURIER_SPEED: f32 = 4.0;
const DROP_OFF: [f32; 3] = [20.0, 0.5, 0.0];
const DROP_OFF_RADIUS: f32 = 3.0;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("scene setup: {0}")]
    Scene(#[from] EcsError),
}

/// Owner of every collaborator arena in the demo
#[derive(Default)]
struct Arenas {
    drawables: SlotMap<DrawableHandle, &'static str>,
    spawners: SlotMap<SpawnerHandle, &'static str>,
    lights: SlotMap<LightHandle, Vec3>,
}

impl ResourceRelease for Arenas {
    fn release(&mut self, resource: ReleasedResource) {
        let freed = match resource {
            ReleasedResource::Drawable(handle) => self.drawables.remove(handle).is_some(),
            ReleasedResource::Spawner(handle) => self.spawners.remove(handle).is_some(),
            ReleasedResource::Light(handle) => self.lights.remove(handle).is_some(),
        };
        log::debug!("Released {resource:?} (was live: {freed})");
    }
}

/// Counts exhaust puffs instead of simulating particles
#[derive(Default)]
struct ExhaustCounter {
    emissions: usize,
}

impl ParticleEmitter for ExhaustCounter {
    fn emit(&mut self, entity: Entity, _spawner: SpawnerHandle) {
        self.emissions += 1;
        log::trace!("{entity} puffed exhaust");
    }
}

/// Remembers where each light was last placed
#[derive(Default)]
struct LightProbe {
    last: Option<(LightHandle, Vec3)>,
}

impl LightSink for LightProbe {
    fn update_light(&mut self, _entity: Entity, light: LightHandle, position: Vec3) {
        self.last = Some((light, position));
    }
}

/// Entities the demo keeps an eye on
struct Scene {
    courier: Entity,
    zone: Entity,
    obstacle: Entity,
}

fn build_scene(world: &mut World, owners: &mut Arenas, config: &EngineConfig) -> Result<Scene, DemoError> {
    let ground = world.create();
    world.attach(ground, Position::default())?;
    world.attach(ground, Collision::fixed())?;
    world.attach(
        ground,
        MeshCollision::new(Arc::new(CollisionMeshTemplate::ground_quad(50.0, 50.0))),
    )?;

    let obstacle = world.create();
    world.attach(obstacle, Position::at(Vec3::new(0.0, 0.5, 0.3)))?;
    world.attach(obstacle, BoundingBox::default())?;
    world.attach(obstacle, Collision::dynamic())?;
    world.attach(obstacle, Movement::from_defaults(&config.movement))?;
    world.attach(obstacle, Graphics::new(owners.drawables.insert("crate")))?;

    let courier = world.create();
    world.attach(courier, Position::at(Vec3::from(COURIER_START)))?;
    world.attach(courier, BoundingBox::default())?;
    world.attach(courier, Collision::dynamic())?;
    world.attach(
        courier,
        Movement::from_defaults(&config.movement)
            .with_velocity(Vec3::new(COURIER_SPEED, 0.0, 0.0))
            .with_direction(Vec3::x()),
    )?;
    world.attach(courier, CameraFocus::new(Vec3::new(0.0, 4.0, -8.0)))?;
    world.attach(courier, Graphics::new(owners.drawables.insert("van")))?;
    world.attach(
        courier,
        PointLight::new(owners.lights.insert(Vec3::zeros()), Vec3::new(0.0, 1.0, 1.0)),
    )?;
    world.attach(courier, ParticleSpawner::new(owners.spawners.insert("exhaust"), 0.25))?;

    let zone = world.create();
    world.attach(zone, DeliveryZone::new(Vec3::from(DROP_OFF), DROP_OFF_RADIUS))?;

    log::info!("Scene ready: {} entities", world.len());
    Ok(Scene {
        courier,
        zone,
        obstacle,
    })
}

fn load_config() -> Result<EngineConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(&path),
        None => Ok(EngineConfig::default()),
    }
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    logging::init_with_filter(&config.logging.filter);
    log::info!("Simulation config: {:?}", config.simulation);

    let mut world = World::new();
    let mut arenas = Arenas::default();
    let mut exhaust = ExhaustCounter::default();
    let mut headlight = LightProbe::default();
    let scene = build_scene(&mut world, &mut arenas, &config)?;

    // Only the courier can complete the delivery, never a shoved crate.
    let mut scheduler = Scheduler::from_config(&config).with_delivery_zones(
        DeliveryZoneSystem::new()
            .with_filter(|world: &World, entity| world.has(entity, ComponentKind::CameraFocus)),
    );
    let mut events = EventQueue::new();
    events.register_handler(
        EventType::DeliveryTriggered,
        Box::new(|event: &GameplayEvent| {
            let GameplayEvent::DeliveryTriggered { actor, tick, .. } = event;
            log::info!("Package delivered by {actor} after {:.2}s", *tick as f32 / TICK_RATE);
            true
        }),
    );

    let dt = 1.0 / TICK_RATE;
    let mut delivered = false;
    while !delivered && scheduler.tick_count() < MAX_TICKS {
        let mut services = TickServices::new(&mut exhaust, &mut headlight, &mut arenas, &mut events);
        let report = scheduler.tick(&mut world, dt, &mut services);
        delivered = !report.events.is_empty();

        if report.tick % 60 == 0 {
            let focus = world.component::<CameraFocus>(scene.courier)?;
            log::info!(
                "t={:.1}s camera target {:?}, headlight {:?}",
                report.tick as f32 * dt,
                focus.target,
                headlight.last.map(|(_, position)| position)
            );
        }
    }

    let zone = world.component::<DeliveryZone>(scene.zone)?;
    log::info!(
        "Finished after {} ticks: delivered={}, exhaust puffs={}, crate at {:?}",
        scheduler.tick_count(),
        zone.triggered,
        exhaust.emissions,
        world.component::<Position>(scene.obstacle)?.world_position()
    );

    world.destroy(scene.courier)?;
    for resource in world.drain_released() {
        arenas.release(resource);
    }
    log::info!(
        "Live after cleanup: {} drawables, {} spawners, {} lights",
        arenas.drawables.len(),
        arenas.spawners.len(),
        arenas.lights.len()
    );
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        log::error!("Demo failed: {err}");
        eprintln!("delivery_demo: {err}");
        std::process::exit(1);
    }
}
