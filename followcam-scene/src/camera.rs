use glam::Mat4;

use followcam_math::{axis_in, translation_of, FORWARD, UP};

/// Perspective lens attached to an entity. The entity's world +X is the
/// viewing direction and its world +Y the up direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Right-handed, OpenGL depth range.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }

    /// View matrix for a lens whose entity has the given world matrix.
    pub fn view(&self, world: &Mat4) -> Mat4 {
        let eye = translation_of(world);
        let forward = axis_in(world, FORWARD).normalize_or_zero();
        let up = axis_in(world, UP).normalize_or_zero();
        Mat4::look_to_rh(eye, forward, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_view_puts_target_straight_ahead() {
        let world = Mat4::from_translation(Vec3::new(-3.0, 1.0, 1.0));
        let view = Camera::default().view(&world);

        // A point along world +X from the eye lands on the view -Z axis.
        let p = view.transform_point3(Vec3::new(2.0, 1.0, 1.0));
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), EPSILON));
    }

    #[test]
    fn test_view_follows_rotation() {
        let world = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let view = Camera::default().view(&world);

        // +X rotated a quarter turn about Y looks down world -Z.
        let p = view.transform_point3(Vec3::new(0.0, 0.0, -4.0));
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), EPSILON));
    }

    #[test]
    fn test_projection_maps_near_plane() {
        let cam = Camera::default();
        let proj = cam.projection(4.0 / 3.0);
        let ndc = proj.project_point3(Vec3::new(0.0, 0.0, -cam.near));
        assert!((ndc.z + 1.0).abs() < 1e-4);
    }
}
