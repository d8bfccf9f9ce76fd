//! Cluster palette and per-point display colors.

use serde::{Deserialize, Serialize};

/// Linear RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Number of distinct cluster colors.
pub const PALETTE_SIZE: usize = 8;

/// Cluster colors, indexed by `cluster_id mod 8`.
pub const PALETTE: [Color; PALETTE_SIZE] = [
    Color::from_hex(0x818cf8),
    Color::from_hex(0xf472b6),
    Color::from_hex(0x34d399),
    Color::from_hex(0xfbbf24),
    Color::from_hex(0xa78bfa),
    Color::from_hex(0xf87171),
    Color::from_hex(0x22d3ee),
    Color::from_hex(0xa3e635),
];

/// Color for unclustered points and for every point in flat mode.
pub const DEFAULT_COLOR: Color = Color::from_hex(0x60a5fa);

/// Color of the hovered point.
pub const HOVER_COLOR: Color = Color::from_hex(0xfacc15);

/// Color of the searched point.
pub const SEARCH_COLOR: Color = Color::from_hex(0xf43f5e);

/// How points are colored when not highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// One palette color per cluster.
    #[default]
    Cluster,
    /// Every point uses [`DEFAULT_COLOR`].
    Flat,
}

impl ColorMode {
    pub fn from_cluster_toggle(use_cluster_colors: bool) -> Self {
        if use_cluster_colors {
            Self::Cluster
        } else {
            Self::Flat
        }
    }
}

/// Palette color for a cluster id, ignoring the color mode.
pub fn cluster_color(cluster_id: i32) -> Color {
    if cluster_id < 0 {
        return DEFAULT_COLOR;
    }
    PALETTE[cluster_id as usize % PALETTE_SIZE]
}

/// Baseline display color of a point.
pub fn point_color(cluster_id: i32, mode: ColorMode) -> Color {
    match mode {
        ColorMode::Cluster => cluster_color(cluster_id),
        ColorMode::Flat => DEFAULT_COLOR,
    }
}

/// Baseline colors for every cluster id, in order.
pub fn compute_colors(cluster_ids: impl IntoIterator<Item = i32>, mode: ColorMode) -> Vec<Color> {
    cluster_ids
        .into_iter()
        .map(|id| point_color(id, mode))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn test_cluster_ids_wrap_around_palette() {
        assert_eq!(cluster_color(0), PALETTE[0]);
        assert_eq!(cluster_color(9), PALETTE[1]);
        assert_eq!(cluster_color(15), PALETTE[7]);
    }

    #[test]
    fn test_negative_cluster_uses_default() {
        assert_eq!(cluster_color(-1), DEFAULT_COLOR);
        assert_eq!(cluster_color(-8), DEFAULT_COLOR);
        assert_eq!(point_color(-3, ColorMode::Cluster), DEFAULT_COLOR);
    }

    #[test]
    fn test_flat_mode_ignores_cluster() {
        let colors = compute_colors([0, 3, -1], ColorMode::Flat);
        assert_eq!(colors, vec![DEFAULT_COLOR; 3]);
    }

    #[test]
    fn test_toggle_restores_mapping() {
        let ids = [0, 1, 2, -1, 17];
        let before = compute_colors(ids, ColorMode::Cluster);
        let _flat = compute_colors(ids, ColorMode::Flat);
        let after = compute_colors(ids, ColorMode::Cluster);
        assert_eq!(before, after);
    }
}
