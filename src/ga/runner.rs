//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the steady-state loop:
//! initialization → (select → crossover → mutate → replace worst) × k → elitism → repeat.

use super::config::GaConfig;
use super::operators::swap_mutation;
use super::population::Population;
use super::types::Crossover;
use crate::error::Result;
use crate::instance::Instance;
use crate::local_search::{TwoOpt, TwoOptOutcome};
use crate::random::rng_from_seed;
use crate::tour::Tour;
use rand::Rng;

/// Result of a GA run.
///
/// Contains the best tour found, along with statistics about the
/// evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best tour found during the entire run, owned by the caller.
    pub best: Tour,

    /// Cost of `best` (after polishing, if enabled).
    pub best_cost: f64,

    /// Operator that produced the children.
    pub crossover: Crossover,

    /// Total number of generations executed.
    pub generations: usize,

    /// Children that displaced the population's worst tour.
    pub replacements: usize,

    /// Global best cost after initialization and after each generation.
    pub fitness_history: Vec<f64>,

    /// 2-opt statistics when the best tour was polished.
    pub polished: Option<TwoOptOutcome>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use tsp_bench::ga::{GaConfig, GaRunner};
/// use tsp_bench::instance::{DistanceMetric, Instance};
///
/// let coords = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)];
/// let instance = Instance::from_coords("demo", &coords, DistanceMetric::Euclidean).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(20)
///     .with_seed(42);
/// let result = GaRunner::run(&instance, &config).unwrap();
/// assert!(result.best.is_valid_permutation(5));
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from [`GaConfig::seed`].
    pub fn run(instance: &Instance, config: &GaConfig) -> Result<GaResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(instance, config, &mut rng)
    }

    /// Runs the GA drawing all randomness from `rng`.
    ///
    /// [`GaConfig::seed`] is ignored.
    pub fn run_with_rng<R: Rng>(
        instance: &Instance,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult> {
        config.validate()?;

        // 1. Initialize and evaluate the population
        let mut population = Population::random(config.population_size, instance, rng)?;

        // 2. Seed the global best
        let mut best = population.best().clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.cost());

        let crossovers = config.crossovers();
        let mut replacements = 0usize;

        // 3. Evolutionary loop
        for gen in 0..config.max_generations {
            let mut gen_replacements = 0usize;

            for _ in 0..crossovers {
                let (p1, p2) = population.select_two_parents(rng);
                let mut child =
                    config
                        .crossover
                        .apply(population.tour(p1), population.tour(p2), rng);

                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    swap_mutation(child.cities_mut(), config.mutation_rate, rng);
                }

                child.evaluate(instance);

                let worst = population.worst_index();
                if child.cost() < population.cost(worst) {
                    population.replace(worst, child);
                    gen_replacements += 1;
                }
            }
            replacements += gen_replacements;

            // Update global best
            let gen_best = population.best_index();
            if population.cost(gen_best) < best.cost() {
                best.copy_from(population.tour(gen_best));
            }

            // Elitism: keep the global best represented
            let worst = population.worst_index();
            if population.cost(worst) > best.cost() {
                population.overwrite_with(worst, &best);
            }

            fitness_history.push(best.cost());

            log::debug!(
                "generation {}: best {:.0}, replacements {}",
                gen + 1,
                best.cost(),
                gen_replacements
            );
        }

        // 4. Optional polish
        let polished = if config.polish_with_two_opt {
            Some(TwoOpt::default().run(&mut best, instance))
        } else {
            None
        };

        log::info!(
            "GA ({}) finished: {} generations, {} replacements, best {:.0}",
            config.crossover,
            config.max_generations,
            replacements,
            best.cost()
        );

        Ok(GaResult {
            best_cost: best.cost(),
            best,
            crossover: config.crossover,
            generations: config.max_generations,
            replacements,
            fitness_history,
            polished,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
