//! Unit quaternion for object orientation
//!
//! Rotations are persisted as `{x, y, z, w}` in scene data, so the
//! quaternion is the canonical representation rather than euler angles.

use serde::{Deserialize, Serialize};

use super::vec::Vec3;

/// Unit quaternion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Build a rotation of `angle_rad` radians about `axis`
    pub fn from_axis_angle(axis: Vec3, angle_rad: f32) -> Self {
        let axis = axis.normalize();
        let half = angle_rad * 0.5;
        let (s, c) = half.sin_cos();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: c,
        }
    }

    /// Yaw rotation about the world up axis, in degrees
    pub fn from_yaw_degrees(degrees: f32) -> Self {
        Self::from_axis_angle(Vec3::UP, degrees.to_radians())
    }

    pub fn normalize(self) -> Self {
        let len = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if len == 0.0 {
            return Quat::IDENTITY;
        }
        Self {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
            w: self.w / len,
        }
    }

    /// Hamilton product: `self * other` applies `other` first, then `self`
    pub fn mul(self, other: Quat) -> Quat {
        Quat {
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(self, v: Vec3) -> Vec3 {
        // v' = v + 2 * q_vec x (q_vec x v + w * v)
        let qv = Vec3::new(self.x, self.y, self.z);
        let t = qv.cross(v).scale(2.0);
        v + t.scale(self.w) + qv.cross(t)
    }

    /// Componentwise closeness check, tolerant of the q / -q ambiguity
    pub fn approx_eq(self, other: Quat, eps: f32) -> bool {
        let same = (self.x - other.x).abs() < eps
            && (self.y - other.y).abs() < eps
            && (self.z - other.z).abs() < eps
            && (self.w - other.w).abs() < eps;
        let negated = (self.x + other.x).abs() < eps
            && (self.y + other.y).abs() < eps
            && (self.z + other.z).abs() < eps
            && (self.w + other.w).abs() < eps;
        same || negated
    }
}

impl Default for Quat {
    fn default() -> Self {
        Quat::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let r = Quat::IDENTITY.rotate(v);
        assert!((r - v).len() < 0.001);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        // 90 degrees about up: +X becomes -Z
        let q = Quat::from_yaw_degrees(90.0);
        let r = q.rotate(Vec3::new(1.0, 0.0, 0.0));
        assert!((r.x - 0.0).abs() < 0.001, "x={}", r.x);
        assert!((r.z - -1.0).abs() < 0.001, "z={}", r.z);
    }

    #[test]
    fn test_compose_yaws() {
        let a = Quat::from_yaw_degrees(30.0);
        let b = Quat::from_yaw_degrees(60.0);
        let composed = a.mul(b);
        let direct = Quat::from_yaw_degrees(90.0);
        assert!(composed.approx_eq(direct, 0.001));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 1.2);
        let v = Vec3::new(3.0, -2.0, 5.0);
        assert!((q.rotate(v).len() - v.len()).abs() < 0.001);
    }
}
