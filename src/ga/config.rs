//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::types::Crossover;
use crate::error::{Result, TspError};

/// Configuration for the steady-state genetic algorithm.
///
/// # Defaults
///
/// ```
/// use tsp_bench::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// assert_eq!(config.crossovers(), 50);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_bench::ga::{Crossover, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_crossover(Crossover::EdgePreserving)
///     .with_mutation_rate(0.05)
///     .with_crossovers_per_generation(40);
/// assert_eq!(config.crossovers(), 40);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours in the population. At least 2.
    pub population_size: usize,

    /// Number of generations. Zero returns the best initial tour.
    pub max_generations: usize,

    /// Probability (0.0–1.0) of mutating a child, and the per-position
    /// swap probability inside the mutation itself.
    pub mutation_rate: f64,

    /// Crossovers per generation. `None` means half the population.
    pub crossovers_per_generation: Option<usize>,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Run 2-opt on the final best tour.
    pub polish_with_two_opt: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            mutation_rate: 0.1,
            crossovers_per_generation: None,
            crossover: Crossover::default(),
            seed: None,
            polish_with_two_opt: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of crossovers per generation.
    pub fn with_crossovers_per_generation(mut self, n: usize) -> Self {
        self.crossovers_per_generation = Some(n);
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables the final 2-opt pass on the best tour.
    pub fn with_two_opt_polish(mut self, polish: bool) -> Self {
        self.polish_with_two_opt = polish;
        self
    }

    /// Effective number of crossovers per generation.
    pub fn crossovers(&self) -> usize {
        self.crossovers_per_generation
            .unwrap_or(self.population_size / 2)
    }

    /// Preset for quick runs: 50 tours, 200 generations.
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 200,
            ..Self::default()
        }
    }

    /// Preset balancing quality and time: 100 tours, 1000 generations.
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            ..Self::default()
        }
    }

    /// Preset for quality: 200 tours, 5000 generations, gentler mutation.
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            max_generations: 5000,
            mutation_rate: 0.05,
            ..Self::default()
        }
    }

    /// Selects a preset from the instance dimension.
    ///
    /// - `dimension < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ dimension < 200` → [`balanced()`](Self::balanced)
    /// - `dimension ≥ 200` → [`quality()`](Self::quality)
    pub fn auto_select(dimension: usize) -> Self {
        if dimension < 50 {
            Self::fast()
        } else if dimension < 200 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TspError::invalid_config(
                "population_size must be at least 2",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::invalid_config(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.max_generations > 0 && self.crossovers() == 0 {
            return Err(TspError::invalid_config(
                "crossovers_per_generation must be at least 1",
            ));
        }
        Ok(())
    }
}
