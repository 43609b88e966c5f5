//! Collision mesh representations
//!
//! Mesh colliders are stored once in model space and transformed into world
//! space only for the tick that tests them.

use crate::foundation::math::{Mat4, Point3, Vec3};

use super::primitives::{Aabb, Penetration, Triangle};

/// A collision mesh template stored in model space
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollisionMeshTemplate {
    /// Triangles in model space (never modified)
    pub local_triangles: Vec<Triangle>,
}

impl CollisionMeshTemplate {
    /// Build from model-space vertices and a triangle index list.
    ///
    /// Indices that point past the vertex list and trailing partial
    /// triangles are ignored.
    pub fn from_vertices(vertices: &[Vec3], indices: &[u32]) -> Self {
        let local_triangles = indices
            .chunks_exact(3)
            .filter_map(|chunk| {
                let v0 = *vertices.get(chunk[0] as usize)?;
                let v1 = *vertices.get(chunk[1] as usize)?;
                let v2 = *vertices.get(chunk[2] as usize)?;
                Some(Triangle::new(v0, v1, v2))
            })
            .collect();

        Self { local_triangles }
    }

    /// Two-triangle quad in the XZ plane, facing +Y
    pub fn ground_quad(half_width: f32, half_depth: f32) -> Self {
        let vertices = [
            Vec3::new(-half_width, 0.0, -half_depth),
            Vec3::new(-half_width, 0.0, half_depth),
            Vec3::new(half_width, 0.0, half_depth),
            Vec3::new(half_width, 0.0, -half_depth),
        ];
        Self::from_vertices(&vertices, &[0, 1, 2, 0, 2, 3])
    }

    /// Transform into world space with `matrix`
    pub fn to_world_space(&self, matrix: &Mat4) -> WorldSpaceCollisionMesh {
        let transform = |v: Vec3| matrix.transform_point(&Point3::from(v)).coords;
        let triangles: Vec<Triangle> = self
            .local_triangles
            .iter()
            .map(|tri| Triangle::new(transform(tri.v0), transform(tri.v1), transform(tri.v2)))
            .collect();

        let corners: Vec<Vec3> = triangles
            .iter()
            .flat_map(|tri| [tri.v0, tri.v1, tri.v2])
            .collect();
        let bounds = Aabb::from_points(&corners).unwrap_or(Aabb {
            min: Vec3::zeros(),
            max: Vec3::zeros(),
        });

        WorldSpaceCollisionMesh { triangles, bounds }
    }
}

/// World-space collision mesh (temporary, rebuilt each tick)
#[derive(Debug, Clone)]
pub struct WorldSpaceCollisionMesh {
    /// Triangles in world space
    pub triangles: Vec<Triangle>,
    /// Bounds of every triangle, used by the broad phase
    pub bounds: Aabb,
}

impl WorldSpaceCollisionMesh {
    /// Deepest penetration of `aabb` into any triangle of the mesh.
    ///
    /// The normal points away from the mesh surface, towards the box.
    pub fn penetration_of_box(&self, aabb: &Aabb) -> Option<Penetration> {
        if !self.bounds.intersects(aabb) {
            return None;
        }
        self.triangles
            .iter()
            .filter_map(|triangle| aabb.penetration_into_triangle(triangle))
            .max_by(|a, b| a.depth.total_cmp(&b.depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_vertices_skips_bad_indices() {
        let vertices = [Vec3::zeros(), Vec3::x(), Vec3::y()];
        let template = CollisionMeshTemplate::from_vertices(&vertices, &[0, 1, 2, 0, 1, 9, 0]);
        assert_eq!(template.local_triangles.len(), 1);
    }

    #[test]
    fn test_world_space_bounds_follow_matrix() {
        let template = CollisionMeshTemplate::ground_quad(2.0, 1.0);
        let world = template.to_world_space(&Mat4::new_translation(&Vec3::new(0.0, -3.0, 0.0)));

        assert_eq!(world.triangles.len(), 2);
        assert_relative_eq!(world.bounds.min, Vec3::new(-2.0, -3.0, -1.0));
        assert_relative_eq!(world.bounds.max, Vec3::new(2.0, -3.0, 1.0));
    }

    #[test]
    fn test_box_resting_in_ground_is_pushed_up() {
        let ground = CollisionMeshTemplate::ground_quad(5.0, 5.0).to_world_space(&Mat4::identity());
        let sunk = Aabb::from_center(Vec3::new(1.0, 0.25, 1.0), Vec3::new(0.5, 0.5, 0.5));
        let hit = ground.penetration_of_box(&sunk).unwrap();

        assert_relative_eq!(hit.normal, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(hit.depth, 0.25, epsilon = 1e-5);

        let clear = Aabb::from_center(Vec3::new(1.0, 2.0, 1.0), Vec3::new(0.5, 0.5, 0.5));
        assert!(ground.penetration_of_box(&clear).is_none());
    }
}
