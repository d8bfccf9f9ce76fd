//! Error types for vector tables.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur while building a vector table.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// The payload is valid JSON but not a word → vector object.
    #[error("invalid vector payload: {0}")]
    InvalidPayload(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
