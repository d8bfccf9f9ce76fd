//! Full-dimension vector table.

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, info, warn};

use crate::error::{EmbeddingError, Result};
use crate::similarity::{SimilarityResult, find_top_k};
use crate::{Embedding, normalize_word};

/// Mapping from lowercase word to its full-precision vector.
///
/// Iteration follows payload order; analogy tie-breaking depends on it.
#[derive(Debug, Clone, Default)]
pub struct VectorTable {
    /// Stored vectors, keyed by normalized word.
    vectors: IndexMap<String, Embedding>,
}

impl VectorTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a JSON object mapping word → array of floats.
    ///
    /// Entries that are not arrays decode to an empty vector; non-numeric
    /// array items decode to `0.0`. Words are lowercased and the first
    /// occurrence of a word wins.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: IndexMap<String, serde_json::Value> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: IndexMap<String, serde_json::Value>) -> Result<Self> {
        if raw.is_empty() {
            return Err(EmbeddingError::InvalidPayload(
                "vector payload has no entries".to_string(),
            ));
        }

        let mut table = Self::new();
        let mut malformed = 0usize;

        for (word, value) in raw {
            let embedding = match value {
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|item| item.as_f64().unwrap_or(0.0) as f32)
                    .collect(),
                _ => {
                    malformed += 1;
                    Vec::new()
                }
            };

            if let Entry::Vacant(slot) = table.vectors.entry(normalize_word(&word)) {
                slot.insert(embedding);
            }
        }

        if malformed > 0 {
            warn!("{malformed} vector entries were not arrays and count as zero vectors");
        }
        info!(
            "Loaded {} word vectors (dimension {})",
            table.len(),
            table.dimension()
        );

        Ok(table)
    }

    /// Insert or replace a word's vector.
    pub fn insert(&mut self, word: &str, embedding: Embedding) {
        let word = normalize_word(word);
        debug!("Inserted vector for: {word}");
        self.vectors.insert(word, embedding);
    }

    /// Look up a word, ignoring case and surrounding whitespace.
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(&normalize_word(word)).map(Vec::as_slice)
    }

    /// Check if a word exists in the table.
    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(&normalize_word(word))
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Longest vector length in the table.
    pub fn dimension(&self) -> usize {
        self.vectors.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Iterate words and vectors in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.vectors
            .iter()
            .map(|(word, embedding)| (word.as_str(), embedding.as_slice()))
    }

    /// Words in table order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.vectors.keys().map(String::as_str)
    }

    /// The `k` words most similar to `query`, skipping `exclude`
    /// (case-insensitive) and words with empty vectors.
    pub fn nearest(&self, query: &[f32], k: usize, exclude: &[&str]) -> Vec<SimilarityResult> {
        let exclude: Vec<String> = exclude.iter().map(|w| normalize_word(w)).collect();
        let candidates = self
            .iter()
            .filter(|(word, _)| !exclude.iter().any(|e| e == word));

        find_top_k(query, candidates, k, -1.0)
    }
}

impl FromIterator<(String, Embedding)> for VectorTable {
    fn from_iter<I: IntoIterator<Item = (String, Embedding)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (word, embedding) in iter {
            table.insert(&word, embedding);
        }
        table
    }
}
