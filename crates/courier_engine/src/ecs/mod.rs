//! Entity-Component-System implementation
//!
//! Entities are generational handles, components live in one sparse-set
//! store per kind, and systems run in a fixed order driven by the
//! [`Scheduler`].

pub mod commands;
pub mod component;
pub mod components;
pub mod entity;
pub mod error;
pub mod query;
pub mod registry;
pub mod scheduler;
pub mod storage;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentData, ComponentKind, ComponentKinds};
pub use entity::Entity;
pub use error::EcsError;
pub use query::Query;
pub use registry::ComponentRegistry;
pub use scheduler::{Scheduler, SystemStage, TickReport};
pub use storage::ComponentStore;
pub use system::{System, SystemContext};
pub use world::World;
