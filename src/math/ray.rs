//! Pointer rays
//!
//! A pick or drag turns the pointer into a world-space ray; everything
//! downstream intersects that ray against planes (drag surfaces) or
//! boxes (selection). Directions are normalized on construction so `t`
//! values are world distances.

use super::vec::Vec3;

/// Near-parallel cutoff for plane intersections
const PLANE_EPSILON: f32 = 0.0001;

/// World-space ray with a unit direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// The point `t` world units along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the infinite plane through `point` with normal
    /// `normal`, or None when the ray runs parallel to the plane or the
    /// plane lies behind the origin.
    pub fn intersect_plane(&self, point: Vec3, normal: Vec3) -> Option<f32> {
        let facing = self.direction.dot(normal);
        if facing.abs() < PLANE_EPSILON {
            return None;
        }
        let t = (point - self.origin).dot(normal) / facing;
        (t >= 0.0).then_some(t)
    }
}
