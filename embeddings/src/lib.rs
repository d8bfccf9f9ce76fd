//! # Embeddings
//!
//! Full-dimension word vectors for the wordspace explorer.
//!
//! ## Features
//!
//! - **Vector Tables**: Lowercase word → float vector, in payload order
//! - **Similarity Math**: Cosine similarity and euclidean distance over
//!   vectors of possibly different lengths
//! - **Analogy Queries**: `a - b + c` and its nearest vocabulary word
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings                                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  JSON payload ──► VectorTable ──► analogize(a, b, c)            │
//! │                        │                 │                      │
//! │                        ▼                 ▼                      │
//! │                   nearest(k)       AnalogyResult                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod analogy;
pub mod error;
pub mod similarity;
pub mod table;

pub use analogy::{AnalogyError, AnalogyResult, Operand, analogize};
pub use error::{EmbeddingError, Result};
pub use similarity::{SimilarityResult, cosine_similarity, euclidean_distance};
pub use table::VectorTable;

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Normalize a word the way vector tables key it: trimmed and lowercase.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}
