//! Vector arithmetic analogies.
//!
//! ```text
//! king - man + woman ≈ queen
//! ```
//!
//! The result vector spans the union of the operands' dimensions; shorter
//! operands contribute zero past their own length. Its nearest neighbor is
//! chosen by cosine similarity alone, over every table word except the
//! three operands.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::similarity::{cosine_similarity, euclidean_distance, magnitude};
use crate::table::VectorTable;
use crate::{Embedding, normalize_word};

/// One of the three analogy inputs, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    A,
    B,
    C,
}

impl Operand {
    /// All operands in validation order.
    pub const ALL: [Operand; 3] = [Operand::A, Operand::B, Operand::C];
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "a"),
            Self::B => write!(f, "b"),
            Self::C => write!(f, "c"),
        }
    }
}

/// Why an analogy could not be computed. `field` names the operand the UI
/// should attribute the message to.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalogyError {
    /// An operand was blank.
    #[error("field {field} is required")]
    MissingRequired { field: Operand },

    /// One or more operands are not in the vocabulary.
    #[error("words not found: {}", missing.join(", "))]
    WordsNotFound { missing: Vec<String>, field: Operand },
}

impl AnalogyError {
    /// The operand this error is attributed to.
    pub fn field(&self) -> Operand {
        match self {
            Self::MissingRequired { field } | Self::WordsNotFound { field, .. } => *field,
        }
    }
}

/// Outcome of a successful analogy query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogyResult {
    /// `a - b + c` over the union of operand dimensions.
    pub result_vector: Embedding,

    /// The first three components of `result_vector`, for 3D placement.
    pub result_position: [f32; 3],

    /// Nearest vocabulary word, if the result vector is non-zero and any
    /// candidate exists.
    pub closest_word: Option<String>,

    /// Cosine similarity of `closest_word` to the result vector.
    pub similarity: f32,

    /// Euclidean distance of `closest_word` to the result vector.
    pub euclidean_distance: f32,
}

/// Compute `a - b + c` and its nearest neighbor in `table`.
pub fn analogize(
    a: &str,
    b: &str,
    c: &str,
    table: &VectorTable,
) -> Result<AnalogyResult, AnalogyError> {
    let inputs = [a, b, c];

    for (input, field) in inputs.iter().zip(Operand::ALL) {
        if input.trim().is_empty() {
            return Err(AnalogyError::MissingRequired { field });
        }
    }

    let words = inputs.map(normalize_word);

    let mut missing = Vec::new();
    let mut first_missing = None;
    for (word, field) in words.iter().zip(Operand::ALL) {
        if !table.contains(word) {
            missing.push(word.clone());
            first_missing.get_or_insert(field);
        }
    }
    if let Some(field) = first_missing {
        debug!("Analogy operands missing from vocabulary: {missing:?}");
        return Err(AnalogyError::WordsNotFound { missing, field });
    }

    let [va, vb, vc] = words.each_ref().map(|w| table.get(w).unwrap_or_default());
    let result_vector = offset(va, vb, vc);
    let (closest_word, similarity, euclidean_distance) =
        match nearest_excluding(&result_vector, table, &words) {
            Some((word, similarity, distance)) => (Some(word.to_string()), similarity, distance),
            None => (None, 0.0, 0.0),
        };

    debug!(
        "{} - {} + {} => {closest_word:?} (similarity {similarity:.4})",
        words[0], words[1], words[2]
    );

    Ok(AnalogyResult {
        result_position: leading_components(&result_vector),
        result_vector,
        closest_word,
        similarity,
        euclidean_distance,
    })
}

/// Componentwise `a - b + c`, zero-padded to the longest operand.
pub fn offset(a: &[f32], b: &[f32], c: &[f32]) -> Embedding {
    let dims = a.len().max(b.len()).max(c.len());
    let mut result = vec![0.0f32; dims];

    for (slot, x) in result.iter_mut().zip(a) {
        *slot += x;
    }
    for (slot, x) in result.iter_mut().zip(b) {
        *slot -= x;
    }
    for (slot, x) in result.iter_mut().zip(c) {
        *slot += x;
    }

    result
}

/// The first three components of a vector, zero-padded.
pub fn leading_components(v: &[f32]) -> [f32; 3] {
    let mut out = [0.0; 3];
    for (slot, x) in out.iter_mut().zip(v) {
        *slot = *x;
    }
    out
}

/// Best candidate by strict `>` on cosine similarity, in table order.
fn nearest_excluding<'a>(
    query: &[f32],
    table: &'a VectorTable,
    exclude: &[String],
) -> Option<(&'a str, f32, f32)> {
    if magnitude(query) == 0.0 {
        return None;
    }

    let mut best: Option<(&str, f32, &[f32])> = None;
    for (word, embedding) in table.iter() {
        if embedding.is_empty() || exclude.iter().any(|e| e == word) {
            continue;
        }

        let similarity = cosine_similarity(query, embedding);
        if best.is_none_or(|(_, best_similarity, _)| similarity > best_similarity) {
            best = Some((word, similarity, embedding));
        }
    }

    best.map(|(word, similarity, embedding)| {
        (word, similarity, euclidean_distance(query, embedding))
    })
}
