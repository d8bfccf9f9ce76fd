//! Analogy overlay: operand and result points with distance segments.

use glam::Vec3;
use wordspace_embeddings::analogy::leading_components;
use wordspace_embeddings::{AnalogyResult, Operand, VectorTable, normalize_word};

/// Role of an overlay point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRole {
    Operand(Operand),
    Result,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPoint {
    pub role: OverlayRole,
    pub label: String,
    pub position: Vec3,
}

/// Segment between two overlay points, by index into
/// [`AnalogyOverlay::points`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySegment {
    pub from: usize,
    pub to: usize,
    pub length: f32,
}

/// Points a, b, c and the result, joined a→b, b→c, c→result.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogyOverlay {
    pub points: [OverlayPoint; 4],
    pub segments: [OverlaySegment; 3],
}

impl AnalogyOverlay {
    /// Build the overlay for a finished calculation. Returns `None` if an
    /// operand is no longer in `table`.
    pub fn build(operands: [&str; 3], table: &VectorTable, result: &AnalogyResult) -> Option<Self> {
        let mut operand_points = Vec::with_capacity(3);
        for (operand, word) in Operand::ALL.into_iter().zip(operands) {
            let label = normalize_word(word);
            let vector = table.get(&label)?;
            operand_points.push(OverlayPoint {
                role: OverlayRole::Operand(operand),
                position: Vec3::from_array(leading_components(vector)),
                label,
            });
        }

        let result_point = OverlayPoint {
            role: OverlayRole::Result,
            label: result
                .closest_word
                .clone()
                .unwrap_or_else(|| "result".to_string()),
            position: Vec3::from_array(result.result_position),
        };

        let mut operand_points = operand_points.into_iter();
        let points = [
            operand_points.next()?,
            operand_points.next()?,
            operand_points.next()?,
            result_point,
        ];
        let segments = [(0, 1), (1, 2), (2, 3)].map(|(from, to)| OverlaySegment {
            from,
            to,
            length: points[from].position.distance(points[to].position),
        });

        Some(Self { points, segments })
    }

    pub fn result(&self) -> &OverlayPoint {
        &self.points[3]
    }
}
