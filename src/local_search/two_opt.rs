//! 2-opt edge-exchange local search.
//!
//! # Algorithm
//!
//! For every pair of non-adjacent tour edges `(t[i], t[i+1])` and
//! `(t[j], t[j+1])`, the gain of replacing them with `(t[i], t[j])` and
//! `(t[i+1], t[j+1])` is
//!
//! ```text
//! gain = d(t[i], t[i+1]) + d(t[j], t[j+1]) - d(t[i], t[j]) - d(t[i+1], t[j+1])
//! ```
//!
//! Whenever `gain > epsilon` the segment `t[i+1..=j]` is reversed on the
//! spot (first-improvement, the scan continues with the modified tour).
//! Passes repeat until one applies no move or the pass cap is reached.
//!
//! # Complexity
//!
//! O(n²) per pass.
//!
//! # Reference
//!
//! Croes (1958), "A Method for Solving Traveling-Salesman Problems"

use crate::error::{Result, TspError};
use crate::instance::Instance;
use crate::tour::Tour;

/// Parameters of the 2-opt search.
///
/// # Examples
///
/// ```
/// use tsp_bench::local_search::TwoOptConfig;
///
/// let config = TwoOptConfig::default().with_max_passes(50);
/// assert_eq!(config.max_passes, 50);
/// assert!((config.epsilon - 0.001).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptConfig {
    /// Minimum gain for a move to count as an improvement.
    ///
    /// Absorbs floating-point noise so equal-cost exchanges never cycle.
    pub epsilon: f64,

    /// Hard cap on full scans of the neighbourhood.
    pub max_passes: usize,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.001,
            max_passes: 1000,
        }
    }
}

impl TwoOptConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.0) {
            return Err(TspError::invalid_config("2-opt epsilon must be positive"));
        }
        if self.max_passes == 0 {
            return Err(TspError::invalid_config(
                "2-opt max_passes must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Statistics of one 2-opt run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TwoOptOutcome {
    /// Whether at least one move was applied.
    pub improved: bool,

    /// Number of full passes executed.
    pub passes: usize,

    /// Number of segment reversals applied.
    pub moves: usize,

    /// Whether the search stopped on the pass cap rather than at a local optimum.
    pub hit_pass_cap: bool,

    /// Cost before the search.
    pub initial_cost: f64,

    /// Authoritative cost after the search.
    pub final_cost: f64,
}

/// Runs 2-opt on `tour` in place with the default configuration.
///
/// Returns `true` if the tour was improved. On return the tour's cached cost
/// equals its true length whenever a move was applied.
///
/// # Examples
///
/// ```
/// use tsp_bench::instance::{DistanceMetric, Instance};
/// use tsp_bench::local_search::two_opt;
/// use tsp_bench::tour::Tour;
///
/// let inst = Instance::from_coords(
///     "square",
///     &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
///     DistanceMetric::Euclidean,
/// ).unwrap();
/// let mut tour = Tour::with_cost(vec![1, 3, 2, 4], &inst);
/// assert!(two_opt(&mut tour, &inst));
/// assert_eq!(tour.cost(), 40.0);
/// ```
pub fn two_opt(tour: &mut Tour, instance: &Instance) -> bool {
    TwoOpt::default().run(tour, instance).improved
}

/// 2-opt searcher carrying a validated configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt {
    config: TwoOptConfig,
}

impl TwoOpt {
    /// Creates a searcher, rejecting configurations that fail
    /// [`TwoOptConfig::validate`].
    pub fn new(config: TwoOptConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TwoOptConfig {
        &self.config
    }

    /// Improves `tour` to a 2-opt local optimum (or until the pass cap).
    ///
    /// The cached cost is decremented by each applied gain during the
    /// search and recomputed from scratch once at the end if any move was
    /// applied, so incremental drift never escapes this function.
    pub fn run(&self, tour: &mut Tour, instance: &Instance) -> TwoOptOutcome {
        let n = tour.len();
        let initial_cost = tour.cost();
        let mut outcome = TwoOptOutcome {
            initial_cost,
            final_cost: initial_cost,
            ..TwoOptOutcome::default()
        };
        if n < 4 {
            return outcome;
        }

        let mut improving = true;
        while improving && outcome.passes < self.config.max_passes {
            improving = false;
            outcome.passes += 1;

            for i in 0..n - 2 {
                for j in i + 2..n {
                    // Reversing t[1..=n-1] would just mirror the whole circuit.
                    if i == 0 && j == n - 1 {
                        continue;
                    }

                    let gain = gain(tour.cities(), instance, i, j);
                    if gain > self.config.epsilon {
                        tour.cities_mut()[i + 1..=j].reverse();
                        tour.set_cost(tour.cost() - gain);
                        outcome.moves += 1;
                        improving = true;
                        log::trace!("2-opt move ({i}, {j}) gain {gain:.3}");
                    }
                }
            }
        }

        outcome.improved = outcome.moves > 0;
        outcome.hit_pass_cap = improving;
        if outcome.hit_pass_cap {
            log::warn!(
                "2-opt stopped on pass cap ({}) before reaching a local optimum",
                self.config.max_passes
            );
        }

        if outcome.improved {
            tour.evaluate(instance);
        }
        outcome.final_cost = tour.cost();

        log::debug!(
            "2-opt: {:.0} -> {:.0} in {} passes, {} moves",
            outcome.initial_cost,
            outcome.final_cost,
            outcome.passes,
            outcome.moves
        );
        outcome
    }
}

/// Gain of exchanging edges `(i, i+1)` and `(j, j+1)`; positive is better.
#[inline]
pub fn gain(order: &[usize], instance: &Instance, i: usize, j: usize) -> f64 {
    let n = order.len();
    let a = order[i];
    let b = order[(i + 1) % n];
    let c = order[j];
    let d = order[(j + 1) % n];

    let old_cost = instance.distance(a, b) + instance.distance(c, d);
    let new_cost = instance.distance(a, c) + instance.distance(b, d);
    old_cost - new_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::{nearest_neighbor, random_walk};
    use crate::instance::DistanceMetric;
    use crate::random::create_rng;
    use crate::tour::tour_length;

    /// Unit square corners plus its centre.
    fn square_with_center() -> Instance {
        Instance::from_coords(
            "square5",
            &[
                (0.0, 0.0),
                (100.0, 0.0),
                (100.0, 100.0),
                (0.0, 100.0),
                (50.0, 50.0),
            ],
            DistanceMetric::Euclidean,
        )
        .unwrap()
    }

    fn random_instance(n: usize, seed: u64) -> Instance {
        use rand::Rng;
        let mut rng = create_rng(seed);
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
            .collect();
        Instance::from_coords("random", &coords, DistanceMetric::Euclidean).unwrap()
    }

    /// Whether segments p1-p2 and p3-p4 properly cross.
    fn segments_cross(inst: &Instance, p1: usize, p2: usize, p3: usize, p4: usize) -> bool {
        let c = |id: usize| {
            let city = inst.city(id);
            (city.x, city.y)
        };
        let orient = |a: (f64, f64), b: (f64, f64), p: (f64, f64)| {
            (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
        };
        let (a, b, p, q) = (c(p1), c(p2), c(p3), c(p4));
        let d1 = orient(a, b, p);
        let d2 = orient(a, b, q);
        let d3 = orient(p, q, a);
        let d4 = orient(p, q, b);
        d1 * d2 < 0.0 && d3 * d4 < 0.0
    }

    #[test]
    fn test_gain_formula() {
        let inst = square_with_center();
        // 1 -> 3 -> 2 -> 4 -> 5 crosses on edges (1,3) and (2,4)
        let order = [1, 3, 2, 4, 5];
        let g = gain(&order, &inst, 0, 2);
        let expected = inst.distance(1, 3) + inst.distance(2, 4)
            - inst.distance(1, 2)
            - inst.distance(3, 4);
        assert_eq!(g, expected);
        assert!(g > 0.0);
    }

    #[test]
    fn test_square_with_center_converges_to_perimeter() {
        let inst = square_with_center();
        let mut orders: Vec<Vec<usize>> = Vec::new();
        // every permutation of 2..=5 behind city 1
        let rest = [2, 3, 4, 5];
        for a in rest {
            for b in rest {
                for c in rest {
                    for d in rest {
                        let tail = [a, b, c, d];
                        let mut uniq = tail.to_vec();
                        uniq.sort_unstable();
                        uniq.dedup();
                        if uniq.len() == 4 {
                            let mut order = vec![1];
                            order.extend_from_slice(&tail);
                            orders.push(order);
                        }
                    }
                }
            }
        }
        assert_eq!(orders.len(), 24);

        // Optimal: perimeter with the centre inserted on one side.
        let optimal = 100.0 * 3.0 + 2.0 * 71.0;

        for order in orders {
            let mut tour = Tour::with_cost(order.clone(), &inst);
            two_opt(&mut tour, &inst);
            assert!(tour.is_valid_permutation(5));
            assert_eq!(tour.cost(), tour_length(tour.cities(), &inst));
            assert_eq!(tour.cost(), optimal, "from {order:?} got {tour}");

            let t = tour.cities();
            for i in 0..5 {
                for j in 0..5 {
                    let (e1a, e1b) = (t[i], t[(i + 1) % 5]);
                    let (e2a, e2b) = (t[j], t[(j + 1) % 5]);
                    if [e1a, e1b].contains(&e2a) || [e1a, e1b].contains(&e2b) {
                        continue;
                    }
                    assert!(
                        !segments_cross(&inst, e1a, e1b, e2a, e2b),
                        "tour {tour} still crosses"
                    );
                }
            }
        }
    }

    #[test]
    fn test_never_increases_cost() {
        let inst = random_instance(40, 11);
        let mut rng = create_rng(42);
        for _ in 0..10 {
            let mut tour = random_walk(&inst, &mut rng);
            let before = tour.cost();
            two_opt(&mut tour, &inst);
            assert!(tour.cost() <= before + 1e-9);
            assert!(tour.is_valid_permutation(40));
        }
    }

    #[test]
    fn test_idempotent_at_convergence() {
        let inst = random_instance(30, 5);
        let mut tour = nearest_neighbor(&inst);
        two_opt(&mut tour, &inst);
        let converged = tour.clone();
        assert!(!two_opt(&mut tour, &inst));
        assert_eq!(tour, converged);
    }

    #[test]
    fn test_cost_is_exact_after_run() {
        let inst = random_instance(50, 8).with_matrix();
        let mut rng = create_rng(9);
        let mut tour = random_walk(&inst, &mut rng);
        let outcome = TwoOpt::default().run(&mut tour, &inst);
        assert!(outcome.improved);
        assert!(outcome.moves > 0);
        assert!(!outcome.hit_pass_cap);
        assert_eq!(outcome.final_cost, tour_length(tour.cities(), &inst));
        assert_eq!(outcome.final_cost, tour.cost());
        assert!(outcome.final_cost < outcome.initial_cost);
    }

    #[test]
    fn test_pass_cap() {
        let inst = random_instance(60, 21);
        let mut rng = create_rng(4);
        let mut tour = random_walk(&inst, &mut rng);
        let searcher = TwoOpt::new(TwoOptConfig::default().with_max_passes(1)).unwrap();
        let outcome = searcher.run(&mut tour, &inst);
        assert_eq!(outcome.passes, 1);
        assert!(outcome.hit_pass_cap);
        // the authoritative recomputation still ran
        assert_eq!(tour.cost(), tour_length(tour.cities(), &inst));
    }

    #[test]
    fn test_tiny_tours_untouched() {
        let inst = square_with_center();
        for n in 0..4 {
            let mut tour = Tour::from_order((1..=n).collect());
            let outcome = TwoOpt::default().run(&mut tour, &inst);
            assert!(!outcome.improved);
            assert_eq!(outcome.passes, 0);
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(TwoOptConfig::default().validate().is_ok());
        assert!(TwoOptConfig::default().with_epsilon(0.0).validate().is_err());
        assert!(TwoOptConfig::default().with_epsilon(f64::NAN).validate().is_err());
        assert!(TwoOptConfig::default().with_max_passes(0).validate().is_err());
    }

    #[test]
    fn test_searcher_rejects_invalid_config() {
        let err = TwoOpt::new(TwoOptConfig::default().with_epsilon(-50.0)).unwrap_err();
        assert!(matches!(err, TspError::InvalidConfig(_)));
        assert!(TwoOpt::new(TwoOptConfig::default().with_max_passes(0)).is_err());

        let searcher = TwoOpt::new(TwoOptConfig::default().with_epsilon(0.5)).unwrap();
        assert_eq!(searcher.config().epsilon, 0.5);
    }

    #[test]
    fn test_converged_tour_needs_one_pass() {
        let inst = square_with_center();
        let mut tour = Tour::with_cost(vec![1, 2, 3, 4, 5], &inst);
        two_opt(&mut tour, &inst);

        let outcome = TwoOpt::default().run(&mut tour, &inst);
        assert_eq!(outcome.passes, 1);
        assert_eq!(outcome.moves, 0);
        assert!(!outcome.hit_pass_cap);
    }
}
