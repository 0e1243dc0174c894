//! Constructive tour builders used as starting points.
//!
//! - [`random_walk`]: city 1 followed by the others in random order, O(n)
//! - [`nearest_neighbor`]: greedy closest-unvisited walk from city 1, O(n²)
//!
//! Both return tours with an evaluated cost.

use crate::instance::Instance;
use crate::random::shuffle;
use crate::tour::Tour;
use rand::Rng;

/// Random walk: starts at city 1 and visits the rest uniformly at random.
pub fn random_walk<R: Rng>(instance: &Instance, rng: &mut R) -> Tour {
    let n = instance.dimension();
    let mut order: Vec<usize> = (1..=n).collect();
    if n > 2 {
        shuffle(&mut order[1..], rng);
    }
    Tour::with_cost(order, instance)
}

/// Nearest neighbour: starts at city 1 and always moves to the closest
/// unvisited city. Ties go to the lowest id.
pub fn nearest_neighbor(instance: &Instance) -> Tour {
    let n = instance.dimension();
    let mut visited = vec![false; n + 1];
    let mut order = Vec::with_capacity(n);

    let mut current = 1;
    order.push(current);
    visited[current] = true;

    for _ in 1..n {
        let mut best: Option<(usize, f64)> = None;
        for candidate in 1..=n {
            if visited[candidate] {
                continue;
            }
            let d = instance.distance(current, candidate);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((candidate, d)),
            }
        }
        let Some((next, _)) = best else { break };
        order.push(next);
        visited[next] = true;
        current = next;
    }

    Tour::with_cost(order, instance)
}
