//! Delivery zone component

use crate::foundation::math::{self, Vec3};

/// Default trigger radius in world units
pub const DEFAULT_ZONE_RADIUS: f32 = 5.0;

/// One-shot gameplay trigger
///
/// `triggered` only ever goes from false to true inside the simulation;
/// [`DeliveryZone::reset`] exists for gameplay code that starts a new
/// episode.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryZone {
    /// Zone centre in world space
    pub pos: Vec3,

    /// Trigger radius; an actor exactly on the boundary counts as inside
    pub radius: f32,

    /// Set once a deliverable actor has entered the zone
    pub triggered: bool,
}

impl Default for DeliveryZone {
    fn default() -> Self {
        Self::new(Vec3::zeros(), DEFAULT_ZONE_RADIUS)
    }
}

impl DeliveryZone {
    /// Untriggered zone
    pub fn new(pos: Vec3, radius: f32) -> Self {
        Self {
            pos,
            radius,
            triggered: false,
        }
    }

    /// Radius must be a non-negative finite number and the centre finite
    pub fn is_valid(&self) -> bool {
        self.radius.is_finite() && self.radius >= 0.0 && math::is_finite(&self.pos)
    }

    /// True when `point` lies within the trigger radius.
    /// A negative radius contains nothing.
    pub fn contains(&self, point: Vec3) -> bool {
        self.radius >= 0.0 && (point - self.pos).norm_squared() <= self.radius * self.radius
    }

    /// Re-arm the trigger for a new episode
    pub fn reset(&mut self) {
        self.triggered = false;
    }
}
