//! Collision geometry
//!
//! - [`primitives`] - Axis-aligned boxes and triangles with overlap and
//!   penetration queries
//! - [`mesh`] - Model-space mesh templates and their per-tick world-space
//!   copies

pub mod mesh;
pub mod primitives;

pub use mesh::{CollisionMeshTemplate, WorldSpaceCollisionMesh};
pub use primitives::{Aabb, Penetration, Triangle};
