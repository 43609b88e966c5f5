//! Position component
//!
//! Spatial state of an entity. A position may be composed under a parent
//! matrix, in which case the entity also reports the `PositionParent` kind.
//! The world matrix is derived on every read, so it can never lag behind a
//! change to either the parent or the local transform.

use crate::foundation::math::{self, Mat4, Quat, Transform, Vec3};

/// Spatial component: local transform plus optional parent matrix
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Position {
    /// Local transform (location, orientation, scale)
    pub transform: Transform,

    /// World matrix of the parent this position is composed under
    pub parent: Option<Mat4>,
}

impl Position {
    /// Unparented position at `location`
    pub fn at(location: Vec3) -> Self {
        Self {
            transform: Transform::from_position(location),
            parent: None,
        }
    }

    /// Unparented position with location and orientation
    pub fn with_orientation(location: Vec3, rotation: Quat) -> Self {
        Self {
            transform: Transform::from_position_rotation(location, rotation),
            parent: None,
        }
    }

    /// Builder pattern: compose under a parent matrix
    pub fn with_parent(mut self, parent: Mat4) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Replace the parent matrix
    pub fn set_parent(&mut self, parent: Option<Mat4>) {
        self.parent = parent;
    }

    /// Local location
    pub fn location(&self) -> Vec3 {
        self.transform.position
    }

    /// Set the local location
    pub fn set_location(&mut self, location: Vec3) {
        self.transform.position = location;
    }

    /// `parent × local`, or just `local` when unparented
    pub fn world_matrix(&self) -> Mat4 {
        let local = self.transform.to_matrix();
        match &self.parent {
            Some(parent) => parent * local,
            None => local,
        }
    }

    /// World-space location
    pub fn world_position(&self) -> Vec3 {
        match &self.parent {
            Some(parent) => math::translation_of(&(parent * self.transform.to_matrix())),
            None => self.transform.position,
        }
    }

    /// Move by a world-space displacement
    pub fn translate_world(&mut self, delta: Vec3) {
        let local_delta = match &self.parent {
            Some(parent) => math::world_to_local_vector(parent, delta),
            None => delta,
        };
        self.transform.position += local_delta;
    }
}
