//! Collaborator handle types
//!
//! Components never own renderer, particle or lighting objects. They hold
//! slotmap keys into arenas owned by the collaborator that created the
//! resource. A default-constructed handle is the null key.

use slotmap::new_key_type;

new_key_type! {
    /// Renderable owned by the renderer collaborator
    pub struct DrawableHandle;

    /// Particle spawner owned by the particle collaborator
    pub struct SpawnerHandle;

    /// Light owned by the lighting collaborator
    pub struct LightHandle;

    /// Cached asset owned by a [`crate::assets::ResourceCache`]
    pub struct ResourceHandle;
}

pub use slotmap::{Key, SlotMap};
