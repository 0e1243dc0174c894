//! Permutation operators for tours.
//!
//! Operate on `&[usize]` orders of 1-based city ids.
//!
//! # Crossover Operators
//!
//! - [`order_crossover`] (OX), Davis (1985): preserves relative order
//! - [`edge_preserving_crossover`] (DPX), Freisleben & Merz (1996): keeps
//!   every edge common to both parents
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: per-position random swaps, O(n)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Freisleben & Merz (1996), "A Genetic Local Search Algorithm for Solving
//!   Symmetric and Asymmetric Traveling Salesman Problems"

use crate::tour::Edge;
use rand::Rng;
use std::collections::HashSet;

// ============================================================================
// Crossover operators
// ============================================================================

/// Order Crossover (OX).
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[start, end]`
/// 2. Copy parent1's segment to the child at the same positions
/// 3. Walk parent2 from `end + 1` (wrapping) and fill the child from
///    `end + 1` (wrapping) with every city not in the segment
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let (start, end) = random_segment(n, rng);
    order_crossover_at(parent1, parent2, start, end)
}

/// OX with a fixed segment `[start, end]` (`start <= end < n`).
pub fn order_crossover_at(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = parent1.len();
    let mut child = vec![0; n];
    let mut in_segment = vec![false; n + 1];

    // Step 1: Copy segment from parent1
    for i in start..=end {
        child[i] = parent1[i];
        in_segment[parent1[i]] = true;
    }

    // Step 2: Fill from parent2, starting after segment end, wrapping around
    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let city = parent2[(end + 1 + offset) % n];
        if !in_segment[city] {
            child[pos] = city;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Distance-Preserving Crossover (DPX).
///
/// # Algorithm
///
/// 1. Intersect the parents' edge sets
/// 2. If fewer than `n / 4` edges are shared, return [`order_crossover`]
/// 3. Otherwise start at parent1's first city and repeatedly move to:
///    an unvisited neighbour along a shared edge; else the first unvisited
///    city walking forward from the current city's position in parent1;
///    else the lowest unvisited id
///
/// The fallbacks only bridge between fragments, so the result is always a
/// permutation.
///
/// # Complexity
/// O(n) expected for the intersection, O(n²) worst case for the walk
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn edge_preserving_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let common = common_edges(parent1, parent2);
    if common.len() < n / 4 {
        log::trace!(
            "DPX: {} shared edges < {}, falling back to order crossover",
            common.len(),
            n / 4
        );
        return order_crossover(parent1, parent2, rng);
    }

    let adjacency = shared_adjacency(&common, n);

    let mut position_in_p1 = vec![0; n + 1];
    for (i, &city) in parent1.iter().enumerate() {
        position_in_p1[city] = i;
    }

    let mut visited = vec![false; n + 1];
    let mut child = Vec::with_capacity(n);
    let mut current = parent1[0];
    child.push(current);
    visited[current] = true;

    while child.len() < n {
        let next = adjacency[current]
            .iter()
            .copied()
            .find(|&c| !visited[c])
            .or_else(|| {
                let from = position_in_p1[current];
                (1..n)
                    .map(|offset| parent1[(from + offset) % n])
                    .find(|&c| !visited[c])
            })
            .or_else(|| (1..=n).find(|&c| !visited[c]));

        let Some(next) = next else { break };
        child.push(next);
        visited[next] = true;
        current = next;
    }

    child
}

/// Edges present in both tours, in parent1's traversal order.
pub fn common_edges(parent1: &[usize], parent2: &[usize]) -> Vec<Edge> {
    let p2_edges: HashSet<Edge> = edges_of(parent2).collect();
    edges_of(parent1).filter(|e| p2_edges.contains(e)).collect()
}

/// Up to two shared-edge neighbours per city, indexed by city id.
fn shared_adjacency(common: &[Edge], n: usize) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::with_capacity(2); n + 1];
    for &Edge(a, b) in common {
        if adjacency[a].len() < 2 {
            adjacency[a].push(b);
        }
        if adjacency[b].len() < 2 {
            adjacency[b].push(a);
        }
    }
    adjacency
}

fn edges_of(order: &[usize]) -> impl Iterator<Item = Edge> + '_ {
    let n = order.len();
    (0..n).map(move |i| Edge::new(order[i], order[(i + 1) % n]))
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: each position, with probability `rate`, is swapped with a
/// uniformly random position (possibly itself).
///
/// # Complexity
/// O(n)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rate: f64, rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    for i in 0..n {
        if rng.random_range(0.0..1.0) < rate {
            let j = rng.random_range(0..n);
            perm.swap(i, j);
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
