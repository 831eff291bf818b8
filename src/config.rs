//! Runtime configuration.
//!
//! Settings come from an optional JSON file; CLI flags and environment
//! variables override individual fields afterwards.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QaError, Result};

/// Embedding model selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model identifier, e.g. "trigram-v1"
    #[serde(default = "default_model")]
    pub model: String,

    /// Embedding vector dimensions, fixed for the process lifetime
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

fn default_model() -> String {
    crate::embedding::hashing::MODEL_NAME.to_string()
}

fn default_dimension() -> usize {
    384
}

fn default_top_k() -> usize {
    crate::retriever::DEFAULT_TOP_K
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            dimension: default_dimension(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaConfig {
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Number of ranked results shown alongside an answer
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            embedding: EmbeddingConfig::default(),
            top_k: default_top_k(),
        }
    }
}

impl QaConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: QaConfig = serde_json::from_str(&content).map_err(|e| {
            QaError::SerializationError(format!("Failed to parse config at {:?}: {}", path, e))
        })?;
        config.validate()?;
        tracing::debug!(?path, ?config, "loaded config");
        Ok(config)
    }

    /// Apply overrides, keeping current values where `None`.
    pub fn with_overrides(mut self, model: Option<String>, dimension: Option<usize>) -> Result<Self> {
        if let Some(model) = model {
            self.embedding.model = model;
        }
        if let Some(dimension) = dimension {
            self.embedding.dimension = dimension;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.embedding.dimension == 0 {
            return Err(QaError::Config(
                "embedding.dimension must be greater than zero".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(QaError::Config("top_k must be greater than zero".to_string()));
        }
        Ok(())
    }
}
