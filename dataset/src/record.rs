//! Point records and the centered dataset.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::RawPoint;

/// Cluster id that marks a point as noise / unclustered.
pub const UNCLUSTERED: i32 = -1;

/// One word (or token) positioned in the reduced 3D space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// Position in the dataset; always equal to the array index.
    pub index: usize,

    /// Display label.
    pub label: String,

    /// Centered coordinates.
    pub position: [f32; 3],

    /// Precomputed cluster; negative means unclustered.
    pub cluster_id: i32,

    /// Precomputed neighbors, already validated against the dataset size.
    pub neighbor_indices: Vec<usize>,
}

impl PointRecord {
    /// Whether this point belongs to a cluster.
    pub fn is_clustered(&self) -> bool {
        self.cluster_id >= 0
    }
}

/// An ordered, origin-centered set of point records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    points: Vec<PointRecord>,

    /// Normalized label → first index carrying it.
    label_to_index: HashMap<String, usize>,

    /// Mean of the raw positions, subtracted from every point.
    raw_centroid: [f32; 3],
}

impl Dataset {
    /// Build records from raw entries and center them at the origin.
    ///
    /// Missing clusters default to `0`; neighbor indices that are negative,
    /// out of range or self-referential are dropped.
    pub fn from_raw(raw: Vec<RawPoint>) -> Self {
        let n = raw.len();
        let raw_centroid = centroid(raw.iter().map(|p| [p.x, p.y, p.z]));

        let points: Vec<PointRecord> = raw
            .into_iter()
            .enumerate()
            .map(|(index, p)| PointRecord {
                index,
                label: p.word,
                position: [
                    p.x - raw_centroid[0],
                    p.y - raw_centroid[1],
                    p.z - raw_centroid[2],
                ],
                cluster_id: p.cluster.unwrap_or(0),
                neighbor_indices: p
                    .edges
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|j| usize::try_from(j).ok())
                    .filter(|&j| j < n && j != index)
                    .collect(),
            })
            .collect();

        let mut label_to_index = HashMap::with_capacity(n);
        for point in &points {
            if let Entry::Vacant(slot) = label_to_index.entry(normalize_label(&point.label)) {
                slot.insert(point.index);
            }
        }

        debug!("Built dataset of {n} points, centroid offset {raw_centroid:?}");

        Self {
            points,
            label_to_index,
            raw_centroid,
        }
    }

    pub fn points(&self) -> &[PointRecord] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&PointRecord> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Resolve a label, ignoring case and surrounding whitespace. Duplicate
    /// labels resolve to their first occurrence.
    pub fn lookup(&self, label: &str) -> Option<usize> {
        self.label_to_index.get(&normalize_label(label)).copied()
    }

    /// Labels in dataset order, for populating search boxes.
    pub fn vocabulary(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    /// The offset that was subtracted to center the dataset.
    pub fn raw_centroid(&self) -> [f32; 3] {
        self.raw_centroid
    }

    /// Mean of the stored (centered) positions.
    pub fn centroid(&self) -> [f32; 3] {
        centroid(self.points.iter().map(|p| p.position))
    }

    /// Number of edges materialized from neighbor lists: each pair is owned
    /// by its smaller index.
    pub fn edge_count(&self) -> usize {
        self.points
            .iter()
            .map(|p| p.neighbor_indices.iter().filter(|&&j| j > p.index).count())
            .sum()
    }
}

/// Normalize a label for lookup: trimmed and lowercase.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

fn centroid(positions: impl Iterator<Item = [f32; 3]>) -> [f32; 3] {
    let mut sum = [0.0f64; 3];
    let mut count = 0usize;
    for p in positions {
        for (s, v) in sum.iter_mut().zip(p) {
            *s += f64::from(v);
        }
        count += 1;
    }

    if count == 0 {
        return [0.0; 3];
    }
    sum.map(|s| (s / count as f64) as f32)
}
