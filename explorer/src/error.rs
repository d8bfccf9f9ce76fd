//! Error types for the explorer.

use thiserror::Error;

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Errors that can occur in the explorer.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Dataset or vector table could not be loaded.
    #[error("data unavailable: {0}")]
    Dataset(#[from] wordspace_dataset::DatasetError),

    /// Analogy operands were blank or not in the vocabulary.
    #[error(transparent)]
    Analogy(#[from] wordspace_embeddings::AnalogyError),

    /// No full-dimension vectors are loaded for the current model.
    #[error("vectors not loaded")]
    VectorsUnavailable,

    /// Word is not in the loaded vector table.
    #[error("word not found: {0}")]
    WordNotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
