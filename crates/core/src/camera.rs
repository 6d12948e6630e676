//! Camera pose: position, view direction, and the FOV-encoding plane vector.

use crate::types::Vec2;

/// Magnitude of the camera plane; 0.66 gives roughly a 66 degree horizontal
/// field of view for the 1:1 projection convention the raycaster uses.
pub const PLANE_MAGNITUDE: f64 = 0.66;

/// Direction and plane stay mutually perpendicular because every rotation is
/// applied to both with the same rotation matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub dir: Vec2,
    pub plane: Vec2,
}

impl Camera {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, dir: Vec2::new(-1.0, 0.0), plane: Vec2::new(0.0, PLANE_MAGNITUDE) }
    }

    pub fn rotate(&mut self, angle: f64) {
        self.dir = self.dir.rotated(angle);
        self.plane = self.plane.rotated(angle);
    }

    /// Ray direction for a camera-space column offset in [-1, 1].
    pub fn ray_dir(&self, camera_x: f64) -> Vec2 {
        self.dir.add(self.plane.scaled(camera_x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_and_plane_stay_perpendicular() {
        let mut camera = Camera::new(Vec2::new(5.0, 5.0));
        for _ in 0..100 {
            camera.rotate(0.173);
            assert!(camera.dir.dot(camera.plane).abs() < 1e-9);
            assert!((camera.dir.length() - 1.0).abs() < 1e-9);
            assert!((camera.plane.length() - PLANE_MAGNITUDE).abs() < 1e-9);
        }
    }

    #[test]
    fn center_ray_is_the_view_direction() {
        let camera = Camera::new(Vec2::ZERO);
        assert_eq!(camera.ray_dir(0.0), camera.dir);
    }

    #[test]
    fn edge_rays_span_the_plane() {
        let camera = Camera::new(Vec2::ZERO);
        let left = camera.ray_dir(-1.0);
        let right = camera.ray_dir(1.0);
        assert_eq!(left, camera.dir.sub(camera.plane));
        assert_eq!(right, camera.dir.add(camera.plane));
    }
}
