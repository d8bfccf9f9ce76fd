//! Similarity computation for embeddings.
//!
//! Vectors in a table may have different lengths (a malformed entry decodes
//! to an empty vector), so every metric here works over the components the
//! two vectors share instead of rejecting a length mismatch.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Compute the cosine similarity between two embeddings.
///
/// Only the first `min(a.len(), b.len())` components take part, magnitudes
/// included. Returns a value between -1.0 and 1.0, or 0.0 when either
/// truncated vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let (a, b) = (&a[..n], &b[..n]);

    let dot_product = dot_product(a, b);
    let magnitude_a = magnitude(a);
    let magnitude_b = magnitude(b);

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

/// Compute the euclidean distance between two embeddings over their shared
/// components.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt()
}

/// Compute the dot product over the shared components.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Euclidean norm of a vector.
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// A similarity search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// The matched word.
    pub word: String,

    /// Cosine similarity to the query.
    pub score: f32,
}

impl SimilarityResult {
    /// Create a new similarity result.
    pub fn new(word: impl Into<String>, score: f32) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// Find the top-k most similar candidates.
///
/// Candidates with an empty vector are skipped. Ties keep candidate order.
pub fn find_top_k<'a>(
    query: &[f32],
    candidates: impl IntoIterator<Item = (&'a str, &'a [f32])>,
    k: usize,
    min_score: f32,
) -> Vec<SimilarityResult> {
    let mut scores: Vec<(OrderedFloat<f32>, &str)> = candidates
        .into_iter()
        .filter(|(_, embedding)| !embedding.is_empty())
        .map(|(word, embedding)| (OrderedFloat(cosine_similarity(query, embedding)), word))
        .filter(|(score, _)| score.0 >= min_score)
        .collect();

    // Stable sort, descending
    scores.sort_by(|a, b| b.0.cmp(&a.0));

    scores
        .into_iter()
        .take(k)
        .map(|(score, word)| SimilarityResult::new(word, score.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cosine_similarity_identical() {
        let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]);
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[-1.0, 0.0, 0.0]);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_uses_shared_prefix() {
        // The trailing component of `a` is ignored, so the prefixes match.
        let sim = cosine_similarity(&[1.0, 1.0, 50.0], &[2.0, 2.0]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_euclidean_distance() {
        let d = euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_find_top_k() {
        let a = [1.0, 0.0, 0.0];
        let b = [0.0, 1.0, 0.0];
        let c = [0.7, 0.7, 0.0];
        let candidates: Vec<(&str, &[f32])> = vec![("a", &a), ("b", &b), ("c", &c)];

        let results = find_top_k(&[1.0, 0.0, 0.0], candidates, 2, -1.0);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].word, "a");
        assert_eq!(results[1].word, "c");
    }

    #[test]
    fn test_find_top_k_keeps_order_on_ties() {
        let first = [2.0, 0.0];
        let second = [1.0, 0.0];
        let empty: [f32; 0] = [];
        let candidates: Vec<(&str, &[f32])> =
            vec![("empty", &empty), ("first", &first), ("second", &second)];

        let results = find_top_k(&[1.0, 0.0], candidates, 5, -1.0);
        let words: Vec<&str> = results.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["first", "second"]);
    }
}
