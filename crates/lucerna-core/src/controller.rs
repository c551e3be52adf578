use glam::{Vec2, Vec3};

use crate::camera::Camera;

/// Keys the free-fly controller cares about. The application layer maps
/// its own key codes onto these before each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Pitch up.
    ArrowUp,
    /// Pitch down.
    ArrowDown,
    /// Yaw left.
    ArrowLeft,
    /// Yaw right.
    ArrowRight,
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Ascend,
    Descend,
}

/// Key-state query seam. Implemented by the (excluded) windowing layer;
/// tests drive it with a fixed key set.
pub trait KeyState {
    fn is_down(&self, key: Key) -> bool;
}

/// Free-fly camera controller. Planar movement is rotated by the current
/// yaw so "forward" follows the view direction; vertical movement is
/// world-axis aligned.
pub struct CameraController {
    /// Rotation speed in degrees per second.
    pub rotate_speed: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            rotate_speed: 60.0,
            move_speed: 5.0,
        }
    }
}

impl CameraController {
    /// Apply one frame of input. `dt` is elapsed seconds. Setters are only
    /// invoked when something actually changed, so an idle frame does not
    /// touch the camera.
    pub fn update(&self, camera: &mut Camera, keys: &dyn KeyState, dt: f32) {
        let mut yaw = camera.yaw();
        let mut pitch = camera.pitch();
        let rot = self.rotate_speed * dt;
        if keys.is_down(Key::ArrowUp) {
            pitch += rot;
        }
        if keys.is_down(Key::ArrowDown) {
            pitch -= rot;
        }
        if keys.is_down(Key::ArrowLeft) {
            yaw += rot;
        }
        if keys.is_down(Key::ArrowRight) {
            yaw -= rot;
        }

        let mut planar = Vec2::ZERO;
        let mut vertical = 0.0;
        let step = self.move_speed * dt;
        if keys.is_down(Key::Forward) {
            planar.y -= step;
        }
        if keys.is_down(Key::Backward) {
            planar.y += step;
        }
        if keys.is_down(Key::StrafeLeft) {
            planar.x -= step;
        }
        if keys.is_down(Key::StrafeRight) {
            planar.x += step;
        }
        if keys.is_down(Key::Descend) {
            vertical -= step;
        }
        if keys.is_down(Key::Ascend) {
            vertical += step;
        }

        if planar != Vec2::ZERO || vertical != 0.0 {
            let planar = rotate_by_yaw(planar, yaw.to_radians());
            camera.set_position(
                camera.position() + Vec3::new(planar.x, vertical, planar.y),
            );
        }
        if yaw != camera.yaw() || pitch != camera.pitch() {
            camera.set_rotation(yaw, pitch);
        }
    }
}

/// Rotate a vector in the XZ plane by the camera's Y rotation, so that
/// (0, -1) maps onto the view's forward direction for any yaw.
fn rotate_by_yaw(v: Vec2, yaw: f32) -> Vec2 {
    let (sin, cos) = yaw.sin_cos();
    Vec2::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Held(HashSet<Key>);

    impl KeyState for Held {
        fn is_down(&self, key: Key) -> bool {
            self.0.contains(&key)
        }
    }

    fn held(keys: &[Key]) -> Held {
        Held(keys.iter().copied().collect())
    }

    fn cam() -> Camera {
        Camera::new(16.0 / 9.0, 90.0, 0.01, 100.0)
    }

    #[test]
    fn test_idle_frame_leaves_camera_untouched() {
        let mut c = cam();
        let view = c.view_matrix();
        CameraController::default().update(&mut c, &held(&[]), 0.016);
        assert_eq!(c.view_matrix(), view);
        assert_eq!(c.position(), Vec3::ZERO);
    }

    #[test]
    fn test_forward_at_zero_yaw_moves_negative_z() {
        let mut c = cam();
        let ctl = CameraController::default();
        ctl.update(&mut c, &held(&[Key::Forward]), 1.0);
        let p = c.position();
        assert!(p.z < 0.0);
        assert!(p.x.abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
    }

    #[test]
    fn test_forward_follows_yaw() {
        let mut c = cam();
        c.set_rotation(90.0, 0.0);
        let ctl = CameraController::default();
        ctl.update(&mut c, &held(&[Key::Forward]), 1.0);
        let p = c.position();
        // Yawed 90° left: forward is now -X.
        assert!((p.x + ctl.move_speed).abs() < 1e-4);
        assert!(p.z.abs() < 1e-4);
    }

    #[test]
    fn test_arrows_change_rotation() {
        let mut c = cam();
        let ctl = CameraController::default();
        ctl.update(&mut c, &held(&[Key::ArrowLeft, Key::ArrowUp]), 0.5);
        assert!(c.yaw() > 0.0);
        assert!(c.pitch() > 0.0);
    }

    #[test]
    fn test_vertical_movement_is_world_aligned() {
        let mut c = cam();
        c.set_rotation(123.0, -45.0);
        let ctl = CameraController::default();
        ctl.update(&mut c, &held(&[Key::Ascend]), 1.0);
        let p = c.position();
        assert!((p.y - ctl.move_speed).abs() < 1e-5);
        assert!(p.x.abs() < 1e-5 && p.z.abs() < 1e-5);
    }
}
