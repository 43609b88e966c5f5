//! Graphics component

use crate::foundation::handles::DrawableHandle;

/// Reference to a renderer-owned drawable
///
/// The handle is released through the resource-release contract when the
/// owning entity is destroyed or the component is detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Graphics {
    /// Renderer arena key
    pub drawable: DrawableHandle,
}

impl Graphics {
    /// Wrap a drawable handle
    pub fn new(drawable: DrawableHandle) -> Self {
        Self { drawable }
    }
}
