//! Point buffers and ray picking.

use glam::{Vec2, Vec3};

use crate::camera::{Camera, Ray};
use crate::palette::Color;

/// Position and color buffers, one entry per point, index-aligned with the
/// dataset's records.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    positions: Vec<Vec3>,
    /// Flat RGB triples, ready for upload.
    colors: Vec<f32>,
    dirty: bool,
}

impl PointCloud {
    pub fn new(positions: Vec<Vec3>, colors: &[Color]) -> Self {
        let mut cloud = Self {
            colors: vec![0.0; positions.len() * 3],
            positions,
            dirty: true,
        };
        for (index, color) in colors.iter().enumerate() {
            cloud.set_color(index, *color);
        }
        cloud
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    /// Flat RGB color buffer.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn color(&self, index: usize) -> Option<Color> {
        let rgb = self.colors.get(rgb_range(index)?)?;
        Some(Color::new(rgb[0], rgb[1], rgb[2]))
    }

    /// Write one point's color. Out-of-range indices are ignored.
    pub fn set_color(&mut self, index: usize, color: Color) -> bool {
        let Some(rgb) = rgb_range(index).and_then(|range| self.colors.get_mut(range)) else {
            return false;
        };
        rgb.copy_from_slice(&color.to_array());
        self.dirty = true;
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return whether the color buffer changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Nearest point to the camera among those within `threshold` of `ray`.
    /// Points behind the ray origin never qualify; ties go to the lower
    /// index.
    pub fn pick_ray(&self, ray: &Ray, threshold: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;

        for (index, position) in self.positions.iter().enumerate() {
            let offset = *position - ray.origin;
            let along = offset.dot(ray.direction);
            if along <= 0.0 {
                continue;
            }
            let perpendicular = (offset - ray.direction * along).length();
            if perpendicular > threshold {
                continue;
            }
            if best.is_none_or(|(_, nearest)| along < nearest) {
                best = Some((index, along));
            }
        }

        best.map(|(index, _)| index)
    }

    /// Pick through a normalized device coordinate.
    pub fn pick(&self, camera: &Camera, ndc: Vec2, threshold: f32) -> Option<usize> {
        self.pick_ray(&camera.ray_from_ndc(ndc), threshold)
    }
}

/// Slice of the color buffer holding point `index`.
fn rgb_range(index: usize) -> Option<std::ops::Range<usize>> {
    let start = index.checked_mul(3)?;
    Some(start..start.checked_add(3)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{DEFAULT_COLOR, HOVER_COLOR};
    use pretty_assertions::assert_eq;

    fn cloud(positions: Vec<Vec3>) -> PointCloud {
        let colors = vec![DEFAULT_COLOR; positions.len()];
        PointCloud::new(positions, &colors)
    }

    #[test]
    fn test_set_color_marks_dirty() {
        let mut cloud = cloud(vec![Vec3::ZERO, Vec3::X]);
        assert!(cloud.take_dirty());
        assert!(!cloud.is_dirty());

        assert!(cloud.set_color(1, HOVER_COLOR));
        assert!(cloud.is_dirty());
        assert_eq!(cloud.color(1), Some(HOVER_COLOR));
        assert_eq!(cloud.color(0), Some(DEFAULT_COLOR));
        assert!(!cloud.set_color(2, HOVER_COLOR));
    }

    #[test]
    fn test_huge_index_is_out_of_range() {
        let mut cloud = cloud(vec![Vec3::ZERO]);
        cloud.take_dirty();

        assert_eq!(cloud.color(usize::MAX), None);
        assert!(!cloud.set_color(usize::MAX / 2, HOVER_COLOR));
        assert!(!cloud.is_dirty());
    }

    #[test]
    fn test_pick_nearest_along_ray() {
        let cloud = cloud(vec![
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(0.0, 0.0, 3.0),
        ]);
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        };
        assert_eq!(cloud.pick_ray(&ray, 0.05), Some(1));
    }

    #[test]
    fn test_pick_ignores_points_behind() {
        let cloud = cloud(vec![Vec3::new(0.0, 0.0, 2.0)]);
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        };
        assert_eq!(cloud.pick_ray(&ray, 0.05), None);
    }

    #[test]
    fn test_pick_tie_goes_to_lower_index() {
        let cloud = cloud(vec![
            Vec3::new(0.01, 0.0, -1.0),
            Vec3::new(-0.01, 0.0, -1.0),
        ]);
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        };
        assert_eq!(cloud.pick_ray(&ray, 0.05), Some(0));
    }

    #[test]
    fn test_pick_through_camera() {
        let camera = Camera::default();
        let points = vec![Vec3::ZERO, Vec3::new(0.6, -0.3, 0.2), Vec3::new(-0.4, 0.5, -0.7)];
        let cloud = cloud(points.clone());

        for (index, point) in points.iter().enumerate() {
            let ndc = camera.project(*point).ndc;
            assert_eq!(cloud.pick(&camera, ndc, 0.05), Some(index));
        }
        assert_eq!(cloud.pick(&camera, Vec2::new(0.95, 0.95), 0.05), None);
    }
}
