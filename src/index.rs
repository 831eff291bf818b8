//! Index trait for pluggable search backends

use crate::error::Result;
use crate::vector::Vector;

/// An append-only search index over fixed-dimension vectors.
///
/// Identifiers are insertion positions: the first vector ever added is `0`,
/// the next `1`, and so on. They are never reused or reassigned.
pub trait VectorIndex {
    /// The dimensionality every stored and query vector must have.
    fn dimension(&self) -> usize;

    /// Append a batch of vectors.
    ///
    /// Either every vector is added or none is: the batch is validated in
    /// full before the index is touched.
    fn add_batch(&mut self, vectors: &[Vector]) -> Result<()>;

    /// Search for the `k` nearest neighbors of `query`.
    /// Returns a Vec of `(id, distance)` pairs sorted by distance ascending,
    /// ties resolved by the lower id.
    fn search(&self, query: &Vector, k: usize) -> Result<Vec<(usize, f32)>>;

    /// The number of vectors in this index.
    fn len(&self) -> usize;

    /// Whether the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
