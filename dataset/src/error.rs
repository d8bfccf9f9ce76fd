//! Error types for dataset loading.
//!
//! Every variant is a "data unavailable" condition: the caller logs it and
//! keeps whatever scene it already has.

use thiserror::Error;

/// Result type alias for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Errors that can occur while resolving, fetching or decoding a dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Model id not in the catalog.
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// Reduction method not recognised.
    #[error("unknown reduction method: {0}")]
    UnknownReduction(String),

    /// Word count of zero.
    #[error("word count must be positive")]
    InvalidWordCount,

    /// Resource request returned a non-success status.
    #[error("resource {path} returned status {status}")]
    Status { path: String, status: u16 },

    /// Resource could not be decompressed or is not UTF-8.
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },

    /// Payload contained no usable entries.
    #[error("resource {0} contains no valid entries")]
    Empty(String),

    /// Invalid base URL or resource path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Vector table error.
    #[error("vector table error: {0}")]
    Vectors(#[from] wordspace_embeddings::EmbeddingError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
