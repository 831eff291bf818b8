//! Error types for the question answering core

use thiserror::Error;

/// Result type alias for knowledge base operations
pub type Result<T> = std::result::Result<T, QaError>;

/// Error types that can occur while indexing or answering
#[derive(Error, Debug)]
pub enum QaError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Length mismatch: {vectors} vectors for {texts} texts")]
    LengthMismatch { vectors: usize, texts: usize },

    #[error("Invalid vector: {reason}")]
    InvalidVector { reason: String },

    #[error("Index error: {0}")]
    IndexError(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}
