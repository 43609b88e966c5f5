//! System trait
//!
//! Systems are plain structs holding scratch buffers and tuning state. The
//! scheduler owns one of each and calls them in a fixed order every tick.

use super::scheduler::SystemStage;
use super::world::World;
use crate::services::TickServices;

/// Per-tick inputs shared by every system
pub struct SystemContext<'s, 'a> {
    /// Clamped tick duration in seconds
    pub delta_time: f32,
    /// Index of the tick being run, starting at zero
    pub tick: u64,
    /// Collaborators and the gameplay event queue
    pub services: &'s mut TickServices<'a>,
}

/// Per-tick logic over entities selected by composition
pub trait System {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Slot this system occupies in the tick order
    fn stage(&self) -> SystemStage;

    /// Run one pass. Structural changes issued here are deferred to the
    /// end of the tick.
    fn run(&mut self, world: &mut World, context: &mut SystemContext<'_, '_>);
}
