//! Camera focus component

use crate::foundation::math::Vec3;

/// Marks the entity the camera tracks
///
/// `target` is derived state, rewritten by the camera focus system every
/// tick from the entity's post-collision world position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraFocus {
    /// Camera target offset from the entity's world position
    pub offset: Vec3,

    /// Last computed camera target in world space
    pub target: Vec3,
}

impl CameraFocus {
    /// Focus with the given offset
    pub fn new(offset: Vec3) -> Self {
        Self {
            offset,
            target: Vec3::zeros(),
        }
    }
}
