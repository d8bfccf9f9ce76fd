//! Perspective camera, viewport mapping and pick rays.

use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;

/// Screen-space rectangle the scene is drawn into, in pixels with the
/// origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Degenerate sizes are clamped to one pixel.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Pixel coordinate to normalized device coordinate (`-1..=1`, y up).
    pub fn to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.width * 2.0 - 1.0,
            1.0 - screen.y / self.height * 2.0,
        )
    }

    /// Normalized device coordinate to pixel coordinate.
    pub fn to_screen(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) / 2.0 * self.width,
            (1.0 - ndc.y) / 2.0 * self.height,
        )
    }

    pub fn contains(&self, screen: Vec2) -> bool {
        (0.0..=self.width).contains(&screen.x) && (0.0..=self.height).contains(&screen.y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

/// Where a world point lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub ndc: Vec2,
    /// False when the point is at or behind the camera plane.
    pub in_front: bool,
}

/// Orbit-style perspective camera looking at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn from_config(config: &CameraConfig, viewport: Viewport) -> Self {
        Self {
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
            fov_degrees: config.fov_degrees,
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector from the camera towards its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    pub fn project(&self, point: Vec3) -> Projection {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return Projection {
                ndc: Vec2::ZERO,
                in_front: false,
            };
        }
        Projection {
            ndc: Vec2::new(clip.x / clip.w, clip.y / clip.w),
            in_front: true,
        }
    }

    /// Ray from the eye through a normalized device coordinate.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let direction = (far - self.position)
            .try_normalize()
            .unwrap_or_else(|| self.forward());
        Ray {
            origin: self.position,
            direction,
        }
    }

    /// Pose that keeps the current viewing direction and sits `distance`
    /// away from `point`, looking at it. Returns `(position, target)`.
    pub fn framing(&self, point: Vec3, distance: f32) -> (Vec3, Vec3) {
        let back = -self.forward();
        (point + back * distance, point)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_viewport_round_trip_corners() {
        let viewport = Viewport::new(200.0, 100.0);
        assert_eq!(viewport.to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(viewport.to_ndc(Vec2::new(200.0, 100.0)), Vec2::new(1.0, -1.0));
        assert_eq!(viewport.to_screen(Vec2::ZERO), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera::default();
        let projection = camera.project(camera.target);
        assert!(projection.in_front);
        assert!(projection.ndc.length() < 1e-5);
    }

    #[test]
    fn test_point_behind_camera() {
        let camera = Camera::default();
        let behind = camera.position - camera.forward();
        assert!(!camera.project(behind).in_front);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::default();
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert!(ray.direction.dot(camera.forward()) > 0.9999);
    }

    #[test]
    fn test_framing_keeps_direction() {
        let camera = Camera::default();
        let point = Vec3::new(0.5, -0.2, 0.1);
        let (position, target) = camera.framing(point, 1.2);

        assert_eq!(target, point);
        assert!((position.distance(point) - 1.2).abs() < 1e-5);
        let new_forward = (target - position).normalize();
        assert!(new_forward.dot(camera.forward()) > 0.9999);
    }
}
