//! Axis-aligned bounding boxes
//!
//! World-space bounds drive every placement decision: room clamping,
//! floor resting, overlap rejection, and pick rays all work on AABBs.

use super::quat::Quat;
use super::ray::Ray;
use super::vec::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Unit cube centered at the origin
    pub const UNIT: Aabb = Aabb {
        min: Vec3 { x: -0.5, y: -0.5, z: -0.5 },
        max: Vec3 { x: 0.5, y: 0.5, z: 0.5 },
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered at `center`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.scale(0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max).scale(0.5)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn extents(&self) -> Vec3 {
        self.size().scale(0.5)
    }

    /// Grow to include another box
    pub fn encapsulate(&mut self, other: &Aabb) {
        self.min = self.min.min_componentwise(other.min);
        self.max = self.max.max_componentwise(other.max);
    }

    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Strict overlap test; touching faces do not count as overlap
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.min.z <= other.min.z
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
            && self.max.z >= other.max.z
    }

    /// World bounds of a local box under scale, rotation and translation.
    ///
    /// Rotation fattens the box: the result encloses all eight rotated
    /// corners, matching how a renderer reports world bounds.
    pub fn transformed(&self, scale: Vec3, rotation: Quat, translation: Vec3) -> Aabb {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for corner in corners {
            let p = rotation.rotate(corner.mul_componentwise(scale)) + translation;
            min = min.min_componentwise(p);
            max = max.max_componentwise(p);
        }
        Aabb { min, max }
    }

    /// Slab-method ray intersection.
    ///
    /// Returns the entry distance along the ray, or None on a miss.
    /// A ray starting inside the box hits at distance 0.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let (origin, dir, min, max) = match axis {
                0 => (ray.origin.x, ray.direction.x, self.min.x, self.max.x),
                1 => (ray.origin.y, ray.direction.y, self.min.y, self.max.y),
                _ => (ray.origin.z, ray.direction.z, self.min.z, self.max.z),
            };

            if dir.abs() < 1e-8 {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let t1 = (min - origin) / dir;
            let t2 = (max - origin) / dir;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None; // Box entirely behind the ray
        }
        Some(t_min.max(0.0))
    }
}
