//! Precomputed pairwise cost cache.

use super::distance::{City, DistanceMetric};

/// Symmetric pairwise costs stored as a flat strict lower triangle.
///
/// Row `i` holds the costs to cities `0..i`, so entry `(i, j)` with `i > j`
/// lives at `i·(i−1)/2 + j`. The diagonal is implicitly zero.
///
/// Indices are 0-based positions in the instance's city list.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    dimension: usize,
    metric: DistanceMetric,
    costs: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes every pairwise cost of `cities` under `metric`.
    ///
    /// # Complexity
    /// O(n²) time, n·(n−1)/2 values
    pub fn build(cities: &[City], metric: DistanceMetric) -> Self {
        let n = cities.len();
        let mut costs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 1..n {
            for j in 0..i {
                costs.push(metric.distance(&cities[i], &cities[j]));
            }
        }
        Self {
            dimension: n,
            metric,
            costs,
        }
    }

    /// Cost between cities at positions `i` and `j`; zero when `i == j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        let (row, col) = if i > j { (i, j) } else { (j, i) };
        assert!(row < self.dimension, "matrix index {row} out of range");
        self.costs[row * (row - 1) / 2 + col]
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The metric the matrix was computed with.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}
