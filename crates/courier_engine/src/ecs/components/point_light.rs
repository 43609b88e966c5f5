//! Point light component

use crate::foundation::handles::LightHandle;
use crate::foundation::math::Vec3;

/// Reference to a lighting-collaborator light that follows its entity
///
/// The light's world position is pushed every tick and never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointLight {
    /// Lighting arena key
    pub light: LightHandle,

    /// Light position relative to the entity's world position
    pub pos_offset: Vec3,
}

impl PointLight {
    /// Light attached at `pos_offset` from its entity
    pub fn new(light: LightHandle, pos_offset: Vec3) -> Self {
        Self { light, pos_offset }
    }
}
