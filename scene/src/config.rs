//! Scene configuration.

use serde::{Deserialize, Serialize};

/// Tuning for picking, search framing and touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Maximum perpendicular distance (world units) between the pick ray
    /// and a point for the point to be picked.
    pub pick_threshold: f32,

    /// Distance from a searched point at which the camera comes to rest.
    pub focus_distance: f32,

    /// Duration of the search camera animation.
    pub animation_ms: u64,

    /// Touch travel (pixels) below which a touch counts as a tap.
    pub touch_tap_slop_px: f32,

    /// Initial camera pose.
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            pick_threshold: 0.05,
            focus_distance: 1.2,
            animation_ms: 1000,
            touch_tap_slop_px: 8.0,
            camera: CameraConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn with_pick_threshold(mut self, threshold: f32) -> Self {
        self.pick_threshold = threshold;
        self
    }

    pub fn with_focus_distance(mut self, distance: f32) -> Self {
        self.focus_distance = distance;
        self
    }

    pub fn with_animation_ms(mut self, ms: u64) -> Self {
        self.animation_ms = ms;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }
}

/// Initial perspective camera pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],

    /// Vertical field of view in degrees.
    pub fov_degrees: f32,

    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [1.8, 1.4, 1.8],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 55.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SceneConfig = serde_json::from_str(r#"{"pick_threshold": 0.1}"#).unwrap();
        assert_eq!(config.pick_threshold, 0.1);
        assert_eq!(config.animation_ms, 1000);
        assert_eq!(config.touch_tap_slop_px, 8.0);
        assert_eq!(config.camera, CameraConfig::default());
    }
}
