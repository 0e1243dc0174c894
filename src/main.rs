//! # tsp-bench CLI
//!
//! Runs TSP heuristics on a TSPLIB file and prints one report line per method.

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use tsp_bench::ga::GaConfig;
use tsp_bench::instance::Instance;
use tsp_bench::random::rng_from_seed;
use tsp_bench::solver::{Method, Solution, Solver};

/// Command-line interface for tsp-bench
#[derive(Parser)]
#[command(name = "tsp-bench")]
#[command(about = "Heuristic solvers for TSPLIB instances")]
#[command(long_about = "Runs constructive heuristics, 2-opt and genetic algorithms on a TSPLIB instance:
  tsp-bench -f berlin52.tsp                 # every heuristic
  tsp-bench -f berlin52.tsp -m nn,2optnn    # selected methods
  tsp-bench -f burma14.tsp -m gadpx --seed 7 --generations 2000

Methods:
  c       canonical order 1..n
  nn      nearest neighbour
  rw      random walk
  2optnn  nearest neighbour + 2-opt
  2optrw  random walk + 2-opt
  ga      genetic algorithm, order crossover (+ 2-opt)
  gadpx   genetic algorithm, edge-preserving crossover (+ 2-opt)")]
#[command(version)]
struct Cli {
    /// TSPLIB instance file
    #[arg(short, long)]
    file: String,

    /// Methods to run, comma separated. Defaults to all of them.
    #[arg(short, long, value_delimiter = ',')]
    method: Vec<Method>,

    /// Also report the canonical tour
    #[arg(short, long)]
    canonical: bool,

    /// Random seed. Omit for a different run each time.
    #[arg(long)]
    seed: Option<u64>,

    /// GA population size
    #[arg(long)]
    population: Option<usize>,

    /// GA generations
    #[arg(long)]
    generations: Option<usize>,

    /// GA mutation rate (0.0-1.0)
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// GA crossovers per generation (default: half the population)
    #[arg(long)]
    crossovers: Option<usize>,

    /// Precompute the pairwise cost matrix
    #[arg(long)]
    matrix: bool,

    /// Print the column header before the results
    #[arg(long)]
    banner: bool,

    /// Increase logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn methods(&self) -> Vec<Method> {
        let mut methods = if self.method.is_empty() {
            Method::ALL
                .into_iter()
                .filter(|&m| m != Method::Canonical)
                .collect()
        } else {
            self.method.clone()
        };
        if self.canonical && !methods.contains(&Method::Canonical) {
            methods.insert(0, Method::Canonical);
        }
        methods
    }

    fn ga_config(&self, dimension: usize) -> GaConfig {
        let mut config = GaConfig::auto_select(dimension);
        if let Some(n) = self.population {
            config = config.with_population_size(n);
        }
        if let Some(n) = self.generations {
            config = config.with_max_generations(n);
        }
        if let Some(rate) = self.mutation_rate {
            config = config.with_mutation_rate(rate);
        }
        if let Some(n) = self.crossovers {
            config = config.with_crossovers_per_generation(n);
        }
        config
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let mut instance = Instance::from_tsplib_file(&cli.file)
        .with_context(|| format!("failed to load instance from {}", cli.file))?;
    if cli.matrix {
        instance.build_matrix();
    }
    log::info!(
        "loaded {} ({} cities, {})",
        instance.name(),
        instance.dimension(),
        instance.metric()
    );

    let config = cli.ga_config(instance.dimension());
    config.validate().context("invalid GA parameters")?;

    let solver = Solver::new(&instance).with_ga_config(config);
    let mut rng = rng_from_seed(cli.seed);

    if cli.banner {
        println!("{}", Solution::banner());
    }
    for method in cli.methods() {
        let solution = solver
            .solve(method, &mut rng)
            .with_context(|| format!("method {method} failed"))?;
        println!("{solution}");
    }

    Ok(())
}
