//! Primitive collision shapes and intersection algorithms
//!
//! Axis-aligned boxes and triangles, with the overlap and penetration
//! queries the collision system's broad and narrow phases need.

use crate::foundation::math::Vec3;

const EPSILON: f32 = 1e-6;

/// Penetration of one shape into another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Unit direction that separates the first shape from the second
    pub normal: Vec3,
    /// Distance to move along `normal` to separate
    pub depth: f32,
}

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Box from centre and half extents
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Smallest box containing every point; `None` for an empty slice
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self { min: *first, max: *first }, |aabb, p| Self {
            min: aabb.min.inf(p),
            max: aabb.max.sup(p),
        }))
    }

    /// Centre point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half size along each axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Overlap test; touching boxes count as overlapping
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Minimum-axis penetration of `self` into `other`.
    ///
    /// The normal points from `other` towards `self`. Returns `None` unless
    /// the boxes overlap with positive depth on every axis.
    pub fn penetration(&self, other: &Self) -> Option<Penetration> {
        let delta = self.center() - other.center();
        let overlap = self.half_extents() + other.half_extents() - delta.abs();
        if overlap.iter().any(|o| *o <= 0.0) {
            return None;
        }

        let axis = overlap.imin();
        let mut normal = Vec3::zeros();
        normal[axis] = if delta[axis] < 0.0 { -1.0 } else { 1.0 };
        Some(Penetration {
            normal,
            depth: overlap[axis],
        })
    }

    /// Separating-axis box/triangle test (13 axes)
    pub fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        let center = self.center();
        let extents = self.half_extents();
        let verts = [
            triangle.v0 - center,
            triangle.v1 - center,
            triangle.v2 - center,
        ];
        let edges = [verts[1] - verts[0], verts[2] - verts[1], verts[0] - verts[2]];

        // Projection radius of the box onto `axis` against the triangle's
        // projected interval.
        let separated = |axis: Vec3| -> bool {
            if axis.norm_squared() < EPSILON {
                return false; // Degenerate axis, skip
            }
            let p = verts.map(|v| v.dot(&axis));
            let radius = extents.x * axis.x.abs() + extents.y * axis.y.abs() + extents.z * axis.z.abs();
            p[0].min(p[1]).min(p[2]) > radius || p[0].max(p[1]).max(p[2]) < -radius
        };

        let box_axes = [Vec3::x(), Vec3::y(), Vec3::z()];
        for box_axis in &box_axes {
            for edge in &edges {
                if separated(box_axis.cross(edge)) {
                    return false;
                }
            }
        }
        for box_axis in box_axes {
            if separated(box_axis) {
                return false;
            }
        }
        !separated(edges[0].cross(&edges[1]))
    }

    /// How far `self` must move to clear the triangle's plane.
    ///
    /// The normal faces the side of the plane the box centre is on.
    pub fn penetration_into_triangle(&self, triangle: &Triangle) -> Option<Penetration> {
        if !self.intersects_triangle(triangle) {
            return None;
        }
        let face_normal = triangle.normal()?;
        let extents = self.half_extents();
        let distance = triangle.distance_to_point(self.center(), &face_normal);
        let radius = extents.x * face_normal.x.abs()
            + extents.y * face_normal.y.abs()
            + extents.z * face_normal.z.abs();

        let normal = if distance < 0.0 { -face_normal } else { face_normal };
        let depth = radius - distance.abs();
        (depth > 0.0).then_some(Penetration { normal, depth })
    }
}

/// A triangle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unit normal (right-hand rule); `None` for a degenerate triangle
    pub fn normal(&self) -> Option<Vec3> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).try_normalize(EPSILON)
    }

    /// Signed distance from the triangle plane to `point`
    pub fn distance_to_point(&self, point: Vec3, normal: &Vec3) -> f32 {
        normal.dot(&(point - self.v0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box_at(center: Vec3) -> Aabb {
        Aabb::from_center(center, Vec3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn test_aabb_overlap() {
        let a = unit_box_at(Vec3::zeros());
        assert!(a.intersects(&unit_box_at(Vec3::new(0.9, 0.0, 0.0))));
        assert!(a.intersects(&unit_box_at(Vec3::new(1.0, 0.0, 0.0))));
        assert!(!a.intersects(&unit_box_at(Vec3::new(1.1, 0.0, 0.0))));
    }

    #[test]
    fn test_penetration_picks_minimum_axis() {
        let a = unit_box_at(Vec3::new(0.2, 0.9, 0.0));
        let b = unit_box_at(Vec3::zeros());
        let hit = a.penetration(&b).unwrap();

        assert_eq!(hit.normal, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(hit.depth, 0.1, epsilon = 1e-5);
        assert!(unit_box_at(Vec3::new(1.0, 0.0, 0.0)).penetration(&b).is_none());
    }

    #[test]
    fn test_from_points() {
        let aabb = Aabb::from_points(&[
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-1.0, 3.0, 0.5),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 0.5));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_box_triangle_separation() {
        let floor = Triangle::new(
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(-10.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 0.0),
        );
        assert!(unit_box_at(Vec3::new(0.0, 0.3, 0.0)).intersects_triangle(&floor));
        assert!(!unit_box_at(Vec3::new(0.0, 0.6, 0.0)).intersects_triangle(&floor));
        assert!(!unit_box_at(Vec3::new(30.0, 0.0, 0.0)).intersects_triangle(&floor));
    }

    #[test]
    fn test_penetration_into_triangle_pushes_up() {
        let floor = Triangle::new(
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(-10.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 0.0),
        );
        let hit = unit_box_at(Vec3::new(0.0, 0.3, 0.0))
            .penetration_into_triangle(&floor)
            .unwrap();

        assert_relative_eq!(hit.normal, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(hit.depth, 0.2, epsilon = 1e-5);
    }
}
