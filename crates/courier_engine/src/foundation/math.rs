//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the spatial `Transform` used by the
//! Position component. Vectors and matrices are treated as plain values.

pub use nalgebra::{Matrix3, Matrix4, Point3, Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Local spatial state: location, orientation and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Location in 3D space
    pub position: Vec3,

    /// Orientation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only a location
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with location and orientation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Normalize `v`, mapping the zero vector (and anything too short to
/// normalize) to zero instead of NaN.
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros)
}

/// Translation column of an affine matrix
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix.m14, matrix.m24, matrix.m34)
}

/// Map a world-space displacement into the space below `parent`.
///
/// Falls back to the displacement itself when the parent's linear part is
/// singular.
pub fn world_to_local_vector(parent: &Mat4, delta: Vec3) -> Vec3 {
    let linear: Mat3 = parent.fixed_view::<3, 3>(0, 0).into_owned();
    linear
        .try_inverse()
        .map_or(delta, |inverse| inverse * delta)
}

/// True when every component is finite
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_or_zero_handles_zero_vector() {
        assert_eq!(normalize_or_zero(Vec3::zeros()), Vec3::zeros());
        assert_relative_eq!(
            normalize_or_zero(Vec3::new(0.0, 3.0, 4.0)),
            Vec3::new(0.0, 0.6, 0.8),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_transform_matrix_translation() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(translation_of(&transform.to_matrix()), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_world_to_local_vector_undoes_parent_scale() {
        let parent = Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 2.0, 2.0));
        let local = world_to_local_vector(&parent, Vec3::new(4.0, 0.0, 0.0));
        assert_relative_eq!(local, Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-6);
    }
}
