//! Heuristic solvers for the symmetric Traveling Salesman Problem.
//!
//! Loads TSPLIB instances and produces tours with:
//!
//! - **Constructive heuristics**: canonical order, random walk and nearest
//!   neighbour, all starting from city 1.
//! - **2-opt local search**: segment-reversal improvement to a local optimum
//!   with an epsilon gain threshold and a pass cap.
//! - **Genetic Algorithm (GA)**: steady-state replacement of the worst tour
//!   with elitism, using order crossover (OX) or distance-preserving
//!   crossover (DPX) and swap mutation.
//!
//! Every method is timed and reported in one shared line format through
//! [`solver::Solver`].
//!
//! # Architecture
//!
//! [`instance`] owns cities, the distance metric (EUC_2D, GEO, ATT) and an
//! optional flat lower-triangular cost matrix. [`tour`] holds a permutation
//! with its cached cost. The algorithms in [`construct`], [`local_search`]
//! and [`ga`] only read the instance; all randomness flows through one
//! explicit generator (see [`random`]).

pub mod construct;
pub mod error;
pub mod ga;
pub mod instance;
pub mod local_search;
pub mod random;
pub mod solver;
pub mod tour;

pub use error::{Result, TspError};
