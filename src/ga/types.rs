//! Recombination strategy selection.

use super::operators::{edge_preserving_crossover, order_crossover};
use crate::tour::Tour;
use rand::Rng;
use std::fmt;

/// The crossover operator used by the GA.
///
/// The variant travels with the run result so reporting never has to
/// infer which operator produced a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Order crossover (OX): keeps a segment of parent 1, fills the rest in
    /// parent 2's relative order.
    #[default]
    Ordered,

    /// Distance-preserving crossover (DPX): keeps every edge shared by both
    /// parents and reconnects the fragments. Falls back to [`Ordered`]
    /// when fewer than `n / 4` edges are shared.
    ///
    /// [`Ordered`]: Crossover::Ordered
    EdgePreserving,
}

impl Crossover {
    /// Produces one child from two parents.
    ///
    /// The child's cost is not evaluated.
    ///
    /// # Panics
    /// Panics if the parents have different lengths or are empty.
    pub fn apply<R: Rng>(self, parent1: &Tour, parent2: &Tour, rng: &mut R) -> Tour {
        let order = match self {
            Crossover::Ordered => order_crossover(parent1.cities(), parent2.cities(), rng),
            Crossover::EdgePreserving => {
                edge_preserving_crossover(parent1.cities(), parent2.cities(), rng)
            }
        };
        Tour::from_order(order)
    }

    pub fn name(self) -> &'static str {
        match self {
            Crossover::Ordered => "order",
            Crossover::EdgePreserving => "edge-preserving",
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_apply_produces_unevaluated_permutation() {
        let mut rng = create_rng(42);
        let p1 = Tour::from_order(vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let p2 = Tour::from_order(vec![8, 6, 4, 2, 7, 5, 3, 1]);
        for crossover in [Crossover::Ordered, Crossover::EdgePreserving] {
            for _ in 0..20 {
                let child = crossover.apply(&p1, &p2, &mut rng);
                assert!(child.is_valid_permutation(8), "{crossover}: {child}");
                assert_eq!(child.cost(), 0.0);
            }
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Crossover::Ordered.to_string(), "order");
        assert_eq!(Crossover::EdgePreserving.to_string(), "edge-preserving");
        assert_eq!(Crossover::default(), Crossover::Ordered);
    }
}
