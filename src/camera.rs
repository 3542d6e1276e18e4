//! View camera for picking and placement
//!
//! Holds the camera's world basis and enough projection state to cast
//! rays through the pointer and to fit imported objects to the view.
//! Rendering itself is out of scope; this is the picking-side camera only.

use crate::math::{Ray, Vec2, Vec3};

/// Camera with explicit basis vectors
///
/// `basis_x` points screen-right, `basis_y` screen-down, `basis_z` is the
/// view direction. Screen-down for Y keeps screen deltas and world deltas
/// sign-compatible without per-call flips.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub basis_x: Vec3,
    pub basis_y: Vec3,
    pub basis_z: Vec3,
    /// Viewport size in pixels
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Vertical field of view in degrees (perspective picking)
    pub fov_y_degrees: f32,
    /// Half-height of the view volume at the demo stage, in world units.
    /// Drives the fit-to-camera import heuristic.
    pub ortho_size: f32,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            basis_x: Vec3::new(1.0, 0.0, 0.0),
            basis_y: Vec3::new(0.0, -1.0, 0.0),
            basis_z: Vec3::new(0.0, 0.0, 1.0),
            viewport_width,
            viewport_height,
            fov_y_degrees: 60.0,
            ortho_size: 5.0,
        }
    }

    /// Aim the camera at a target point, keeping the horizon level
    pub fn look_at(&mut self, position: Vec3, target: Vec3) {
        let forward = (target - position).normalize();
        // Degenerate straight-up/down views keep the previous basis
        let right = Vec3::UP.cross(forward);
        if right.len() < 0.0001 {
            self.position = position;
            return;
        }
        self.position = position;
        self.basis_z = forward;
        self.basis_x = right.normalize();
        self.basis_y = self.basis_x.cross(forward).normalize();
    }

    /// View direction in world space
    pub fn forward(&self) -> Vec3 {
        self.basis_z
    }

    /// Viewport aspect ratio (width over height)
    pub fn aspect(&self) -> f32 {
        if self.viewport_height <= 0.0 {
            return 1.0;
        }
        self.viewport_width / self.viewport_height
    }

    /// Generate a world-space ray through a screen position.
    ///
    /// Inverts a standard pinhole projection: screen coords are mapped to
    /// the view plane at unit distance, then rotated into world space by
    /// the camera basis.
    pub fn screen_to_ray(&self, screen: Vec2) -> Ray {
        let half_h = (self.viewport_height / 2.0).max(1.0);
        let tan_half_fov = (self.fov_y_degrees.to_radians() / 2.0).tan();

        let ndc_x = (screen.x - self.viewport_width / 2.0) / half_h;
        let ndc_y = (screen.y - self.viewport_height / 2.0) / half_h;

        let world_dir = self.basis_x * (ndc_x * tan_half_fov)
            + self.basis_y * (ndc_y * tan_half_fov)
            + self.basis_z;

        Ray::new(self.position, world_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_is_forward() {
        let mut camera = Camera::new(320.0, 240.0);
        camera.look_at(Vec3::new(0.0, 2.0, -10.0), Vec3::new(0.0, 2.0, 0.0));

        let ray = camera.screen_to_ray(Vec2::new(160.0, 120.0));
        let dot = ray.direction.dot(camera.forward());
        assert!(dot > 0.99, "center ray should align with forward, dot={}", dot);
    }

    #[test]
    fn test_right_of_center_leans_right() {
        let mut camera = Camera::new(320.0, 240.0);
        camera.look_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO);

        let ray = camera.screen_to_ray(Vec2::new(300.0, 120.0));
        assert!(ray.direction.dot(camera.basis_x) > 0.0);
    }

    #[test]
    fn test_below_center_leans_down() {
        let mut camera = Camera::new(320.0, 240.0);
        camera.look_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO);

        // Screen y grows downward; basis_y points screen-down
        let ray = camera.screen_to_ray(Vec2::new(160.0, 230.0));
        assert!(ray.direction.y < 0.0, "dir.y={}", ray.direction.y);
    }

    #[test]
    fn test_look_at_basis_is_orthonormal() {
        let mut camera = Camera::new(320.0, 240.0);
        camera.look_at(Vec3::new(3.0, 4.0, -7.0), Vec3::new(-1.0, 1.0, 2.0));

        assert!((camera.basis_x.len() - 1.0).abs() < 0.001);
        assert!((camera.basis_y.len() - 1.0).abs() < 0.001);
        assert!((camera.basis_z.len() - 1.0).abs() < 0.001);
        assert!(camera.basis_x.dot(camera.basis_y).abs() < 0.001);
        assert!(camera.basis_x.dot(camera.basis_z).abs() < 0.001);
        assert!(camera.basis_y.dot(camera.basis_z).abs() < 0.001);
    }
}
