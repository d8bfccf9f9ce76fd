//! Neighbor edges drawn between clustered points.

use glam::Vec3;

use crate::palette::{Color, cluster_color};

/// Opacity shared by every edge segment.
pub const EDGE_OPACITY: f32 = 0.25;

/// One line segment between two neighboring points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    pub from_index: usize,
    pub to_index: usize,
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
    pub opacity: f32,
}

/// Build the edge segments for a point set.
///
/// Each pair is emitted once, by the point with the smaller index, and is
/// colored with that point's cluster color whatever the point color mode.
/// Neighbor indices that do not refer to a later point are skipped.
pub fn build_edge_segments(
    positions: &[Vec3],
    cluster_ids: &[i32],
    neighbors: &[Vec<usize>],
) -> Vec<EdgeSegment> {
    let mut segments = Vec::new();

    for (i, adjacent) in neighbors.iter().enumerate() {
        let (Some(&start), Some(&cluster_id)) = (positions.get(i), cluster_ids.get(i)) else {
            continue;
        };
        let color = cluster_color(cluster_id);

        for &j in adjacent {
            if j <= i {
                continue;
            }
            let Some(&end) = positions.get(j) else {
                continue;
            };
            segments.push(EdgeSegment {
                from_index: i,
                to_index: j,
                start,
                end,
                color,
                opacity: EDGE_OPACITY,
            });
        }
    }

    segments
}
