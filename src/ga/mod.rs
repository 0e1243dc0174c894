//! Steady-state genetic algorithm for the TSP.
//!
//! Each generation draws a fixed number of parent pairs, recombines them into
//! one child each, optionally mutates the child and lets it displace the
//! population's worst tour when strictly better. The global best is kept
//! outside the population and re-inserted by elitism.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, generations, presets)
//! - [`Crossover`]: Recombination operator (order or edge-preserving)
//! - [`Population`]: Fixed-size pool of tours with cached costs
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best tour with run statistics
//!
//! # Submodules
//!
//! - [`operators`]: OX and DPX crossover, swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Whitley et al. (1989), *Scheduling Problems and Traveling Salesmen: The Genetic Edge Recombination Operator*
//! - Freisleben & Merz (1996), *A Genetic Local Search Algorithm for Solving Symmetric and Asymmetric TSPs*

mod config;
pub mod operators;
mod population;
mod runner;
mod types;

pub use config::GaConfig;
pub use population::Population;
pub use runner::{GaResult, GaRunner};
pub use types::Crossover;
