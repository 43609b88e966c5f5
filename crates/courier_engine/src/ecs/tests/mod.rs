//! Cross-system scenarios driven through the scheduler

mod tick_ordering;

use crate::config::SimulationConfig;
use crate::ecs::systems::test_support::Collaborators;
use crate::ecs::{Scheduler, TickReport, World};

/// Scheduler that accepts whole-second steps
fn unclamped_scheduler() -> Scheduler {
    Scheduler::new(SimulationConfig { max_step: 10.0 })
}

fn step(scheduler: &mut Scheduler, world: &mut World, collaborators: &mut Collaborators, dt: f32) -> TickReport {
    scheduler.tick(world, dt, &mut collaborators.services())
}
