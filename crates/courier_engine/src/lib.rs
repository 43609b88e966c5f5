//! # Courier Engine
//!
//! Entity-component-system core for a real-time 3D delivery game.
//!
//! ## Features
//!
//! - **ECS Architecture**: Generational entities, sparse-set component stores
//!   and composition queries
//! - **Fixed Tick Order**: Movement, collision, delivery zones, particles,
//!   lights and camera run in a deterministic sequence
//! - **Deferred Structural Changes**: Entities and components changed during
//!   a tick are applied atomically at the end of it
//! - **Collaborator Contracts**: Renderer, particle and lighting owners are
//!   reached through narrow traits and slotmap handles
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courier_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut world = World::new();
//!     let mut scheduler = Scheduler::from_config(&config);
//!
//!     let zone = world.create();
//!     world.attach(zone, DeliveryZone::new(Vec3::zeros(), 5.0))?;
//!
//!     let courier = world.create();
//!     world.attach(courier, Position::at(Vec3::new(10.0, 0.0, 0.0)))?;
//!     world.attach(courier, Movement::drifting(Vec3::new(-2.0, 0.0, 0.0)))?;
//!
//!     let (mut particles, mut lights, mut resources) =
//!         (NullCollaborator, NullCollaborator, NullCollaborator);
//!     let mut events = EventQueue::new();
//!     let mut services = TickServices::new(&mut particles, &mut lights, &mut resources, &mut events);
//!
//!     let report = scheduler.tick(&mut world, 1.0 / 60.0, &mut services);
//!     println!("tick {} raised {} events", report.tick, report.events.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod physics;
pub mod services;
pub mod settings;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, EngineConfig, MovementDefaults, SimulationConfig},
        ecs::{
            components::{
                BoundingBox, CameraFocus, Collision, DeliveryZone, Graphics, MeshCollision,
                Movement, ParticleSpawner, PointLight, Position,
            },
            ComponentKind, ComponentKinds, EcsError, Entity, Scheduler, TickReport, World,
        },
        events::{EventHandler, EventQueue, EventType, GameplayEvent},
        foundation::math::{Mat4, Quat, Transform, Vec3},
        services::{
            LightSink, NullCollaborator, ParticleEmitter, ReleasedResource, ResourceRelease,
            TickServices,
        },
    };
}
