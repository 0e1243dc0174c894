//! Tours: closed circuits over every city of an instance.

use crate::instance::Instance;
use std::fmt;

/// A permutation of 1-based city ids plus its cached total cost.
///
/// The cost is the sum of consecutive-pair distances, wrapping from the last
/// city back to the first. Any code that changes the order must call
/// [`evaluate`](Self::evaluate) (or otherwise restore the cost) before the
/// tour is compared against others.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    cities: Vec<usize>,
    cost: f64,
}

/// An undirected link between two cities, stored smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Edge(a, b)
        } else {
            Edge(b, a)
        }
    }
}

impl Tour {
    /// Wraps an order without computing its cost (cost is 0 until evaluated).
    pub fn from_order(cities: Vec<usize>) -> Self {
        Self { cities, cost: 0.0 }
    }

    /// Wraps an order and computes its cost against `instance`.
    pub fn with_cost(cities: Vec<usize>, instance: &Instance) -> Self {
        let mut tour = Self::from_order(cities);
        tour.evaluate(instance);
        tour
    }

    /// The identity tour `[1, 2, …, n]`, unevaluated.
    pub fn canonical(n: usize) -> Self {
        Self::from_order((1..=n).collect())
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Visiting order.
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Mutable visiting order. The cached cost is left untouched.
    pub fn cities_mut(&mut self) -> &mut [usize] {
        &mut self.cities
    }

    pub fn into_cities(self) -> Vec<usize> {
        self.cities
    }

    /// Cached total cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }

    /// Recomputes the total cost from scratch, stores and returns it.
    pub fn evaluate(&mut self, instance: &Instance) -> f64 {
        self.cost = tour_length(&self.cities, instance);
        self.cost
    }

    /// Copies `src` (order and cost) into `self`.
    ///
    /// Does nothing and returns `false` when the lengths differ.
    pub fn copy_from(&mut self, src: &Tour) -> bool {
        if self.cities.len() != src.cities.len() {
            return false;
        }
        self.cities.copy_from_slice(&src.cities);
        self.cost = src.cost;
        true
    }

    /// The `n` edges of the closed circuit, normalised smaller id first.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.cities.len();
        (0..n).map(move |i| Edge::new(self.cities[i], self.cities[(i + 1) % n]))
    }

    /// Whether the order is a permutation of `1..=n` with `n == dimension`.
    pub fn is_valid_permutation(&self, dimension: usize) -> bool {
        is_permutation(&self.cities, dimension)
    }
}

impl fmt::Display for Tour {
    /// `[c1,c2,…,cn]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, city) in self.cities.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{city}")?;
        }
        f.write_str("]")
    }
}

/// Total closed-circuit length of `order` under `instance`.
pub fn tour_length(order: &[usize], instance: &Instance) -> f64 {
    let n = order.len();
    (0..n)
        .map(|i| instance.distance(order[i], order[(i + 1) % n]))
        .sum()
}

/// Whether `order` holds each of `1..=dimension` exactly once.
pub fn is_permutation(order: &[usize], dimension: usize) -> bool {
    if order.len() != dimension {
        return false;
    }
    let mut seen = vec![false; dimension + 1];
    for &city in order {
        if city == 0 || city > dimension || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::DistanceMetric;

    fn square() -> Instance {
        Instance::from_coords(
            "square",
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
            DistanceMetric::Euclidean,
        )
        .unwrap()
    }

    #[test]
    fn test_cost_wraps_around() {
        let inst = square();
        let tour = Tour::with_cost(vec![1, 2, 3, 4], &inst);
        assert_eq!(tour.cost(), 40.0);
        let crossed = Tour::with_cost(vec![1, 3, 2, 4], &inst);
        assert_eq!(crossed.cost(), 14.0 + 10.0 + 14.0 + 10.0);
    }

    #[test]
    fn test_cost_with_matrix_matches() {
        let inst = square();
        let cached = square().with_matrix();
        let order = vec![2, 4, 1, 3];
        assert_eq!(
            tour_length(&order, &inst),
            tour_length(&order, &cached)
        );
    }

    #[test]
    fn test_copy_from_size_mismatch_is_noop() {
        let mut dst = Tour::canonical(4);
        dst.set_cost(1.0);
        let src = Tour::canonical(5);
        assert!(!dst.copy_from(&src));
        assert_eq!(dst.cities(), &[1, 2, 3, 4]);
        assert_eq!(dst.cost(), 1.0);
    }

    #[test]
    fn test_copy_from() {
        let inst = square();
        let src = Tour::with_cost(vec![4, 3, 2, 1], &inst);
        let mut dst = Tour::canonical(4);
        assert!(dst.copy_from(&src));
        assert_eq!(dst, src);
    }

    #[test]
    fn test_edges_normalized() {
        let tour = Tour::from_order(vec![3, 1, 4, 2]);
        let edges: Vec<Edge> = tour.edges().collect();
        assert_eq!(
            edges,
            vec![Edge(1, 3), Edge(1, 4), Edge(2, 4), Edge(2, 3)]
        );
    }

    #[test]
    fn test_permutation_check() {
        assert!(is_permutation(&[2, 1, 3], 3));
        assert!(!is_permutation(&[2, 2, 3], 3));
        assert!(!is_permutation(&[0, 1, 2], 3));
        assert!(!is_permutation(&[1, 2, 4], 3));
        assert!(!is_permutation(&[1, 2], 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Tour::from_order(vec![1, 3, 2]).to_string(), "[1,3,2]");
        assert_eq!(Tour::from_order(vec![]).to_string(), "[]");
    }
}
