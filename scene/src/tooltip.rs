//! Renderer-agnostic overlay outputs: tooltip and point markers.

use glam::{Vec2, Vec3};
use serde::Serialize;

/// Tooltip content and placement for an external overlay layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tooltip {
    pub visible: bool,
    pub text: String,
    pub screen_x: f32,
    pub screen_y: f32,
}

impl Tooltip {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn shown(text: String, screen: Vec2) -> Self {
        Self {
            visible: true,
            text,
            screen_x: screen.x,
            screen_y: screen.y,
        }
    }

    pub fn hide(&mut self) {
        *self = Self::hidden();
    }
}

/// Tooltip text for a point: its label and coordinates.
pub fn tooltip_text(label: &str, position: Vec3) -> String {
    format!(
        "{label} ({:.3}, {:.3}, {:.3})",
        position.x, position.y, position.z
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Hover,
    Search,
}

/// Marker primitive placed on a highlighted point.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub index: usize,
    pub position: Vec3,
}
