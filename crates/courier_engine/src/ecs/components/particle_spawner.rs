//! Particle spawner component
//!
//! A countdown: the spawner system subtracts the tick duration from
//! `reset_timer` and emits once the timer reaches zero.

use crate::foundation::handles::SpawnerHandle;

/// Default emission period in seconds
pub const DEFAULT_SPAWN_LIFETIME: f32 = 1.0;

/// Periodic particle emission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpawner {
    /// Emission period in seconds
    pub lifetime: f32,

    /// Seconds until the next emission
    pub reset_timer: f32,

    /// Particle collaborator arena key
    pub spawner: SpawnerHandle,
}

impl Default for ParticleSpawner {
    fn default() -> Self {
        Self::new(SpawnerHandle::default(), DEFAULT_SPAWN_LIFETIME)
    }
}

impl ParticleSpawner {
    /// Spawner whose first emission happens one period from now
    pub fn new(spawner: SpawnerHandle, lifetime: f32) -> Self {
        Self {
            lifetime,
            reset_timer: lifetime,
            spawner,
        }
    }

    /// Builder pattern: emit on the first tick
    pub fn immediate(mut self) -> Self {
        self.reset_timer = 0.0;
        self
    }

    /// Period must be a positive finite number
    pub fn is_valid(&self) -> bool {
        self.lifetime.is_finite() && self.lifetime > 0.0 && self.reset_timer.is_finite()
    }

    /// Count down by `delta_time`; returns true when an emission is due,
    /// re-arming the timer. At most one emission per call.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        self.reset_timer -= delta_time;
        if self.reset_timer <= 0.0 {
            self.reset_timer = self.lifetime;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_once_per_period() {
        let mut spawner = ParticleSpawner::new(SpawnerHandle::default(), 1.0);
        assert!(!spawner.tick(0.4));
        assert!(!spawner.tick(0.4));
        assert!(spawner.tick(0.4));
        assert_eq!(spawner.reset_timer, 1.0);
    }

    #[test]
    fn test_large_step_emits_once() {
        let mut spawner = ParticleSpawner::new(SpawnerHandle::default(), 0.1);
        assert!(spawner.tick(5.0));
        assert_eq!(spawner.reset_timer, 0.1);
    }

    #[test]
    fn test_invalid_lifetime() {
        assert!(!ParticleSpawner::new(SpawnerHandle::default(), 0.0).is_valid());
        assert!(!ParticleSpawner::new(SpawnerHandle::default(), f32::INFINITY).is_valid());
        assert!(ParticleSpawner::default().immediate().is_valid());
    }
}
