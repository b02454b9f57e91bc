//! Perspective camera.
//!
//! Supplies view and projection matrices to renderers. Model transforms are
//! owned by whatever is being drawn.

use glam::{Mat4, Vec3};

/// Look-at camera with a perspective projection (wgpu depth range `0..1`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            fov_y_deg: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// World-to-camera transform.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_in_front_of_default_camera() {
        let cam = Camera::default();
        let p = cam.view().transform_point3(Vec3::ZERO);
        assert!((p.z + 3.0).abs() < 1e-5);
    }

    #[test]
    fn target_maps_inside_depth_range() {
        let cam = Camera::default();
        let clip = cam.projection(1.0) * cam.view() * Vec3::ZERO.extend(1.0);
        let ndc_z = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&ndc_z), "ndc z = {ndc_z}");
    }

    #[test]
    fn invalid_aspect_falls_back_to_square() {
        let cam = Camera::default();
        assert_eq!(cam.projection(0.0), cam.projection(1.0));
        assert_eq!(cam.projection(f32::NAN), cam.projection(1.0));
    }
}
