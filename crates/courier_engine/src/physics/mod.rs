//! Physics module
//!
//! Geometry for the collision system. There is no solver here: systems do
//! simple integration and push overlapping boxes apart along one axis.

pub mod collision;

pub use collision::{Aabb, CollisionMeshTemplate, Penetration, Triangle, WorldSpaceCollisionMesh};
