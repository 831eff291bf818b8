//! Brute-force flat index: exact O(n) k-NN search
//!
//! Every query scans all stored rows, so a search costs `O(n * d)` distance
//! work plus `O(n)` selection. That stays well under a millisecond for the
//! few hundred documents this index is meant for and grows linearly beyond;
//! past a few thousand documents an approximate index behind
//! [`VectorIndex`] is the better fit.

use std::cmp::Ordering;

use crate::distance::squared_euclidean;
use crate::error::{QaError, Result};
use crate::index::VectorIndex;
use crate::vector::Vector;

/// A flat (brute-force) index that computes distance to every stored vector.
#[derive(Debug)]
pub struct FlatIndex {
    dimension: usize,
    /// Row-major storage: row `i` is `data[i * dimension..(i + 1) * dimension]`.
    data: Vec<f32>,
    rows: usize,
}

impl FlatIndex {
    /// Create a new empty flat index for vectors of `dimension` components.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
            rows: 0,
        }
    }

    #[cfg(test)]
    fn row(&self, id: usize) -> Option<&[f32]> {
        if id >= self.rows {
            return None;
        }
        let start = id.checked_mul(self.dimension)?;
        self.data.get(start..start + self.dimension)
    }

    fn check_dimension(&self, vector: &Vector) -> Result<()> {
        if vector.dimension() != self.dimension {
            return Err(QaError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.dimension(),
            });
        }
        Ok(())
    }
}

fn by_distance_then_id(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0))
}

impl VectorIndex for FlatIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn add_batch(&mut self, vectors: &[Vector]) -> Result<()> {
        if vectors.is_empty() {
            return Ok(());
        }
        if self.dimension == 0 {
            return Err(QaError::IndexError(
                "cannot store vectors in a zero-dimension index".to_string(),
            ));
        }
        for vector in vectors {
            self.check_dimension(vector)?;
        }

        self.data.reserve(vectors.len() * self.dimension);
        for vector in vectors {
            self.data.extend_from_slice(vector.as_slice());
        }
        self.rows += vectors.len();
        Ok(())
    }

    fn search(&self, query: &Vector, k: usize) -> Result<Vec<(usize, f32)>> {
        self.check_dimension(query)?;

        let n = self.len();
        let k = k.min(n);
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut results: Vec<(usize, f32)> = (0..n)
            .map(|id| {
                let start = id * self.dimension;
                let row = &self.data[start..start + self.dimension];
                (id, squared_euclidean(query.as_slice(), row))
            })
            .collect();

        if k < n {
            results.select_nth_unstable_by(k - 1, by_distance_then_id);
            results.truncate(k);
        }
        results.sort_by(by_distance_then_id);
        Ok(results)
    }

    fn len(&self) -> usize {
        self.rows
    }
}
