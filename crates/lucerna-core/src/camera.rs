use glam::{Mat4, Vec3};

/// Free-fly camera with eagerly derived matrices.
///
/// Every setter recomputes the view and inverse projection-view matrices
/// before returning, so accessors never observe stale state. Rotation is
/// deliberately unclamped — callers wanting pitch limits clamp before
/// calling.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    /// Rotation around Y, in degrees.
    yaw: f32,
    /// Rotation around X, in degrees.
    pitch: f32,
    aspect: f32,
    fov_y_deg: f32,
    near: f32,
    far: f32,
    view: Mat4,
    projection: Mat4,
    inv_proj_view: Mat4,
}

impl Camera {
    pub fn new(aspect: f32, fov_y_deg: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            aspect,
            fov_y_deg,
            near,
            far,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            inv_proj_view: Mat4::IDENTITY,
        };
        cam.recalc_projection();
        cam.recalc_view();
        cam
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recalc_view();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set yaw and pitch in degrees. No clamping.
    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.recalc_view();
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_projection(&mut self, aspect: f32, fov_y_deg: f32, near: f32, far: f32) {
        self.aspect = aspect;
        self.fov_y_deg = fov_y_deg;
        self.near = near;
        self.far = far;
        self.recalc_projection();
        self.recalc_view();
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn inverse_projection_view(&self) -> Mat4 {
        self.inv_proj_view
    }

    fn recalc_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    /// view = Rx(-pitch) · Ry(-yaw) · Translate(-position)
    fn recalc_view(&mut self) {
        self.view = Mat4::from_rotation_x(-self.pitch.to_radians())
            * Mat4::from_rotation_y(-self.yaw.to_radians())
            * Mat4::from_translation(-self.position);
        self.inv_proj_view = (self.projection * self.view).inverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cam() -> Camera {
        Camera::new(16.0 / 9.0, 90.0, 0.01, 100.0)
    }

    #[test]
    fn test_setters_are_immediately_visible() {
        let mut c = cam();
        let v0 = c.view_matrix();
        let ipv0 = c.inverse_projection_view();

        c.set_position(Vec3::new(1.0, 2.0, 3.0));
        assert_ne!(c.view_matrix(), v0, "position must propagate to view");
        assert_ne!(c.inverse_projection_view(), ipv0);

        let v1 = c.view_matrix();
        c.set_projection(1.0, 60.0, 0.1, 50.0);
        // Projection alone leaves the view untouched but changes inv PV.
        assert_eq!(c.view_matrix(), v1);
        assert_ne!(c.inverse_projection_view(), ipv0);
    }

    #[test]
    fn test_rotation_propagates() {
        let mut c = cam();
        c.set_rotation(0.0, 0.0);
        let v0 = c.view_matrix();
        let ipv0 = c.inverse_projection_view();
        c.set_rotation(90.0, 0.0);
        assert_ne!(c.view_matrix(), v0);
        assert_ne!(c.inverse_projection_view(), ipv0);
    }

    #[test]
    fn test_identity_pose_view_is_identity() {
        let mut c = cam();
        c.set_position(Vec3::ZERO);
        c.set_rotation(0.0, 0.0);
        let v = c.view_matrix();
        assert!(v.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_inverse_pv_is_consistent() {
        let mut c = cam();
        c.set_position(Vec3::new(-3.45, 2.17, 3.53));
        c.set_rotation(-48.0, -33.0);
        let pv = Mat4::perspective_rh(90.0f32.to_radians(), 16.0 / 9.0, 0.01, 100.0)
            * c.view_matrix();
        let product = pv * c.inverse_projection_view();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn test_rotation_is_unclamped() {
        let mut c = cam();
        c.set_rotation(720.0, -540.0);
        assert_eq!(c.yaw(), 720.0);
        assert_eq!(c.pitch(), -540.0);
    }

    #[test]
    fn test_translation_moves_opposite_in_view_space() {
        let mut c = cam();
        c.set_position(Vec3::new(0.0, 0.0, 5.0));
        // A point at the camera position maps to the view-space origin.
        let p = c.view_matrix().transform_point3(Vec3::new(0.0, 0.0, 5.0));
        assert!(p.abs_diff_eq(Vec3::ZERO, 1e-6));
    }
}
