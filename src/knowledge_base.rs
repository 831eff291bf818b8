//! In-memory knowledge base: a vector index plus the parallel document texts

use crate::error::{QaError, Result};
use crate::flat_index::FlatIndex;
use crate::index::VectorIndex;
use crate::vector::Vector;

/// Documents and their embeddings, grown by appending only.
///
/// Invariant: `index.len() == documents.len()`, and index id `i` refers to
/// `documents[i]`.
#[derive(Debug)]
pub struct KnowledgeBase<I: VectorIndex> {
    index: I,
    documents: Vec<String>,
}

impl KnowledgeBase<FlatIndex> {
    /// Create an empty knowledge base backed by a brute-force flat index.
    pub fn new(dimension: usize) -> Self {
        Self::with_index(FlatIndex::new(dimension))
    }
}

impl<I: VectorIndex> KnowledgeBase<I> {
    /// Create a knowledge base over the given (empty) index.
    pub fn with_index(index: I) -> Self {
        debug_assert!(index.is_empty());
        Self {
            index,
            documents: Vec::new(),
        }
    }

    /// Append embeddings and their texts in lockstep.
    ///
    /// The whole batch is rejected before anything is stored if the counts
    /// differ or any vector has the wrong dimension.
    pub fn insert(&mut self, vectors: Vec<Vector>, texts: Vec<String>) -> Result<()> {
        if vectors.len() != texts.len() {
            return Err(QaError::LengthMismatch {
                vectors: vectors.len(),
                texts: texts.len(),
            });
        }

        let expected = self.index.dimension();
        if let Some(bad) = vectors.iter().find(|v| v.dimension() != expected) {
            return Err(QaError::DimensionMismatch {
                expected,
                actual: bad.dimension(),
            });
        }

        self.index.add_batch(&vectors)?;
        self.documents.extend(texts);
        debug_assert_eq!(self.index.len(), self.documents.len());
        Ok(())
    }

    /// Search for the k nearest documents, as `(id, squared distance)` pairs.
    pub fn search(&self, query: &Vector, k: usize) -> Result<Vec<(usize, f32)>> {
        if self.is_empty() {
            return Ok(vec![]);
        }
        self.index.search(query, k)
    }

    /// Get a document's text by id
    pub fn document(&self, id: usize) -> Option<&str> {
        self.documents.get(id).map(String::as_str)
    }

    /// Iterate over all documents in insertion order
    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(String::as_str)
    }

    /// Get the number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the knowledge base is empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Get the number of stored vectors (always equal to `len()`)
    pub fn vector_count(&self) -> usize {
        self.index.len()
    }

    /// Get the configured embedding dimension
    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    /// Get a reference to the underlying index.
    pub fn index(&self) -> &I {
        &self.index
    }
}
