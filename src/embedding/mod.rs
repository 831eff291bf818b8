//! Text embedding capability.
//!
//! The retriever only relies on the [`Embedder`] contract: one fixed-length
//! vector per input text, in input order, deterministic for a given model.

pub mod hashing;

pub use hashing::HashingEmbedder;

use crate::config::EmbeddingConfig;
use crate::error::{QaError, Result};
use crate::vector::Vector;

/// Maps text to fixed-length dense vectors.
pub trait Embedder: Send + Sync {
    /// Model identifier
    fn model_name(&self) -> &str;

    /// Length of every vector this embedder produces
    fn dimension(&self) -> usize;

    /// Encode a batch of texts in a single model invocation.
    fn encode(&self, texts: &[String]) -> Result<Vec<Vector>>;
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn encode(&self, texts: &[String]) -> Result<Vec<Vector>> {
        (**self).encode(texts)
    }
}

/// Create an embedder from configuration.
pub fn create_embedder(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
    if config.dimension == 0 {
        return Err(QaError::Config(
            "Embedding dimension must be greater than zero".to_string(),
        ));
    }

    match config.model.as_str() {
        hashing::MODEL_NAME => Ok(Box::new(HashingEmbedder::new(config.dimension))),
        other => Err(QaError::Config(format!(
            "Unknown embedding model: '{}'. Supported models: {}",
            other,
            hashing::MODEL_NAME
        ))),
    }
}
