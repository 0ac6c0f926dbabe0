use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Perspective camera with a cached projection matrix.
///
/// The projection only changes when [`update_projection_matrix`] is called,
/// so callers mutate `fov`/`aspect`/`near`/`far` and then refresh it once.
///
/// [`update_projection_matrix`]: PerspectiveCamera::update_projection_matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub rotation: Quat,
    pub up: Vec3,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(50.0, 1.0, 0.1, 2000.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    /// Recompute the cached projection from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Direction the camera looks along (its local -Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Rotate so the camera's -Z axis points at `target`.
    ///
    /// A target at the camera position leaves the rotation untouched.
    pub fn look_at(&mut self, target: Vec3) {
        let back = self.position - target;
        if back.length_squared() < f32::EPSILON {
            return;
        }
        let z = back.normalize();
        let mut x = self.up.cross(z);
        if x.length_squared() < f32::EPSILON {
            // up is parallel to the view direction; nudge it
            let nudged = if z.z.abs() < 0.9 { Vec3::Z } else { Vec3::X };
            x = nudged.cross(z);
        }
        let x = x.normalize();
        let y = z.cross(x);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn projection_is_cached_until_refreshed() {
        let mut cam = PerspectiveCamera::new(75.0, 2.0, 0.1, 1000.0);
        let before = cam.projection_matrix();
        cam.aspect = 800.0 / 600.0;
        assert_eq!(cam.projection_matrix(), before);
        cam.update_projection_matrix();
        assert_ne!(cam.projection_matrix(), before);
        let expected = Mat4::perspective_rh(75f32.to_radians(), 800.0 / 600.0, 0.1, 1000.0);
        assert_eq!(cam.projection_matrix(), expected);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(3.0, 4.0, 10.0);
        cam.look_at(Vec3::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!(cam.forward().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn look_at_straight_down_stays_finite() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(0.0, 10.0, 0.0);
        cam.look_at(Vec3::ZERO);
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Y, 1e-5));
        assert!(!cam.view_matrix().is_nan());
    }

    #[test]
    fn look_at_own_position_is_noop() {
        let mut cam = PerspectiveCamera::default();
        cam.look_at(Vec3::ZERO);
        assert_eq!(cam.rotation, Quat::IDENTITY);
    }

    #[test]
    fn view_matrix_maps_target_onto_negative_z() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(0.0, 0.0, 10.0);
        cam.look_at(Vec3::ZERO);
        let p = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-5));
    }
}
