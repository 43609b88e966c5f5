//! Movement component for entities integrated by the movement system
//!
//! The effective acceleration is the constant term (gravity by default) plus
//! a steerable term: a direction, normalized at integration time, scaled by
//! a scalar magnitude.

use crate::config::MovementDefaults;
use crate::foundation::math::{self, Vec3};

/// Standard gravity used by the default constant acceleration
pub const GRAVITY: f32 = 9.8;

/// Default steering acceleration magnitude
pub const DEFAULT_ACCELERATION: f32 = 6.0;

/// Component for entities that move
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    /// Always-on acceleration in units per second squared
    pub constant_acceleration: Vec3,

    /// Steering direction; need not be normalized, zero means no steering
    pub acceleration_direction: Vec3,

    /// Steering magnitude in units per second squared
    pub acceleration: f32,

    /// Linear velocity in units per second
    pub velocity: Vec3,
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            constant_acceleration: Vec3::new(0.0, -GRAVITY, 0.0),
            acceleration_direction: Vec3::zeros(),
            acceleration: DEFAULT_ACCELERATION,
            velocity: Vec3::zeros(),
        }
    }
}

impl Movement {
    /// Default movement with configured gravity and steering magnitude
    pub fn from_defaults(defaults: &MovementDefaults) -> Self {
        Self {
            constant_acceleration: defaults.gravity,
            acceleration: defaults.acceleration,
            ..Self::default()
        }
    }

    /// Movement without gravity travelling at `velocity`
    pub fn drifting(velocity: Vec3) -> Self {
        Self {
            constant_acceleration: Vec3::zeros(),
            velocity,
            ..Self::default()
        }
    }

    /// Builder pattern: set velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder pattern: set steering direction
    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.acceleration_direction = direction;
        self
    }

    /// Acceleration applied this tick
    pub fn effective_acceleration(&self) -> Vec3 {
        self.constant_acceleration
            + math::normalize_or_zero(self.acceleration_direction) * self.acceleration
    }

    /// Advance velocity by one step and return the displacement for the step
    pub fn integrate(&mut self, delta_time: f32) -> Vec3 {
        self.velocity += self.effective_acceleration() * delta_time;
        self.velocity * delta_time
    }

    /// Stop all motion, keeping the configured accelerations
    pub fn stop(&mut self) {
        self.velocity = Vec3::zeros();
    }
}
