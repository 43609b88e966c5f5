//! Collision detection components
//!
//! `Collision` marks an entity as a collider. The shape comes from a
//! `BoundingBox`, a `MeshCollision`, or both (the box then serves the broad
//! phase and the mesh the narrow phase).

use std::sync::Arc;

use crate::foundation::math::{self, Vec3};
use crate::physics::collision::{Aabb, CollisionMeshTemplate};

/// Collider flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Static colliders never move: they are skipped by integration and
    /// act as immovable obstacles
    pub is_static: bool,

    /// Collision layer bitmask (what layer is this entity on?)
    pub layer: u32,

    /// Collision mask (what layers can this entity collide with?)
    pub mask: u32,
}

impl Default for Collision {
    fn default() -> Self {
        Self {
            is_static: false,
            layer: u32::MAX,
            mask: u32::MAX,
        }
    }
}

impl Collision {
    /// Immovable collider on all layers
    pub fn fixed() -> Self {
        Self {
            is_static: true,
            ..Self::default()
        }
    }

    /// Movable collider on all layers
    pub fn dynamic() -> Self {
        Self::default()
    }

    /// Create a collider with specific layer and mask
    pub fn with_layers(mut self, layer: u32, mask: u32) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Both sides must accept each other's layer
    pub fn accepts(&self, other: &Self) -> bool {
        self.mask & other.layer != 0 && other.mask & self.layer != 0
    }
}

/// Axis-aligned box centred on the entity's world position plus `offset`
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    /// Half size along each axis
    pub half_extents: Vec3,

    /// Box centre relative to the entity's world position
    pub offset: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            half_extents: Vec3::new(0.5, 0.5, 0.5),
            offset: Vec3::zeros(),
        }
    }
}

impl BoundingBox {
    /// Box with the given half extents and no offset
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            half_extents,
            offset: Vec3::zeros(),
        }
    }

    /// Builder pattern: set centre offset
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Finite, non-negative extents and a finite offset
    pub fn is_valid(&self) -> bool {
        math::is_finite(&self.half_extents)
            && math::is_finite(&self.offset)
            && self.half_extents.iter().all(|e| *e >= 0.0)
    }

    /// World-space box for an entity at `world_position`
    pub fn world_aabb(&self, world_position: Vec3) -> Aabb {
        Aabb::from_center(world_position + self.offset, self.half_extents)
    }
}

/// Triangle mesh collider
///
/// The template lives in model space and is shared between every entity
/// using the same geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshCollision {
    /// Model-space collision geometry
    pub mesh: Arc<CollisionMeshTemplate>,
}

impl MeshCollision {
    /// Wrap a shared template
    pub fn new(mesh: Arc<CollisionMeshTemplate>) -> Self {
        Self { mesh }
    }

    /// A mesh with no triangles cannot collide
    pub fn is_valid(&self) -> bool {
        !self.mesh.local_triangles.is_empty()
    }
}
