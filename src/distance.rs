//! Distance and similarity for ranking documents

/// Compute the squared Euclidean (L2) distance between two equal-length slices.
///
/// The square root is skipped: ranking is unchanged and the similarity
/// transform is defined over the squared distance.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum()
}

/// Map a non-negative distance onto `(0, 1]`, higher is more similar.
///
/// Only an exact match (distance 0) reaches 1.0. This is a display scale,
/// not a probability.
pub fn similarity_from_distance(distance: f32) -> f32 {
    1.0 / (1.0 + distance)
}
