//! Method selection, timing and result reporting.
//!
//! A [`Solver`] runs one [`Method`] against an instance and returns a
//! [`Solution`] whose `Display` is the one-line report shared by every
//! method:
//!
//! ```text
//! <instance> <tag> <seconds:.6> <cost:.0> [<id>,<id>,...]
//! ```

use crate::construct::{nearest_neighbor, random_walk};
use crate::error::{Result, TspError};
use crate::ga::{Crossover, GaConfig, GaRunner};
use crate::instance::Instance;
use crate::local_search::two_opt;
use crate::tour::Tour;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Header matching the columns of [`Solution`]'s report line.
pub const BANNER: &str = "Instance; Method; CPU time (sec); Length; Tour";

/// A tour-producing method, identified on the command line by its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// `c`: the identity tour.
    Canonical,
    /// `nn`: nearest neighbour from city 1.
    NearestNeighbor,
    /// `rw`: random walk from city 1.
    RandomWalk,
    /// `2optnn`: nearest neighbour, then 2-opt.
    TwoOptNearestNeighbor,
    /// `2optrw`: random walk, then 2-opt.
    TwoOptRandomWalk,
    /// `ga`: GA with order crossover, then 2-opt.
    Genetic,
    /// `gadpx`: GA with edge-preserving crossover, then 2-opt.
    GeneticDpx,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Canonical,
        Method::NearestNeighbor,
        Method::RandomWalk,
        Method::TwoOptNearestNeighbor,
        Method::TwoOptRandomWalk,
        Method::Genetic,
        Method::GeneticDpx,
    ];

    /// Short tag used on the command line and in report lines.
    pub fn tag(self) -> &'static str {
        match self {
            Method::Canonical => "c",
            Method::NearestNeighbor => "nn",
            Method::RandomWalk => "rw",
            Method::TwoOptNearestNeighbor => "2optnn",
            Method::TwoOptRandomWalk => "2optrw",
            Method::Genetic => "ga",
            Method::GeneticDpx => "gadpx",
        }
    }

    /// Crossover operator for the GA methods.
    pub fn crossover(self) -> Option<Crossover> {
        match self {
            Method::Genetic => Some(Crossover::Ordered),
            Method::GeneticDpx => Some(Crossover::EdgePreserving),
            _ => None,
        }
    }
}

impl From<Crossover> for Method {
    fn from(crossover: Crossover) -> Self {
        match crossover {
            Crossover::Ordered => Method::Genetic,
            Crossover::EdgePreserving => Method::GeneticDpx,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Method {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self> {
        Method::ALL
            .into_iter()
            .find(|m| m.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TspError::UnknownMethod(s.to_string()))
    }
}

/// The outcome of one timed method run.
#[derive(Debug, Clone)]
pub struct Solution {
    pub instance_name: String,
    pub method: Method,
    pub tour: Tour,
    /// Wall-clock time of the method, measured with [`Instant`].
    ///
    /// This is the value printed under the banner's "CPU time" column; it
    /// includes any time the process spent descheduled.
    pub elapsed: Duration,
}

impl Solution {
    pub fn cost(&self) -> f64 {
        self.tour.cost()
    }

    /// Column header for report lines.
    pub fn banner() -> &'static str {
        BANNER
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.6} {:.0} {}",
            self.instance_name,
            self.method,
            self.elapsed.as_secs_f64(),
            self.tour.cost(),
            self.tour
        )
    }
}

/// Runs methods against one instance.
#[derive(Debug, Clone)]
pub struct Solver<'a> {
    instance: &'a Instance,
    ga: GaConfig,
}

impl<'a> Solver<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            ga: GaConfig::auto_select(instance.dimension()),
        }
    }

    /// Overrides the GA parameters. The crossover is chosen per method.
    pub fn with_ga_config(mut self, config: GaConfig) -> Self {
        self.ga = config;
        self
    }

    pub fn instance(&self) -> &Instance {
        self.instance
    }

    pub fn ga_config(&self) -> &GaConfig {
        &self.ga
    }

    /// Runs `method`, timing everything from construction to the final
    /// 2-opt pass.
    pub fn solve<R: Rng>(&self, method: Method, rng: &mut R) -> Result<Solution> {
        let start = Instant::now();
        let tour = self.build(method, rng)?;
        let elapsed = start.elapsed();

        log::info!(
            "{} {}: cost {:.0} in {:.3}s",
            self.instance.name(),
            method,
            tour.cost(),
            elapsed.as_secs_f64()
        );

        Ok(Solution {
            instance_name: self.instance.name().to_string(),
            method,
            tour,
            elapsed,
        })
    }

    /// Runs every method in `methods` in order, sharing `rng`.
    pub fn solve_all<R: Rng>(&self, methods: &[Method], rng: &mut R) -> Result<Vec<Solution>> {
        methods.iter().map(|&m| self.solve(m, rng)).collect()
    }

    fn build<R: Rng>(&self, method: Method, rng: &mut R) -> Result<Tour> {
        let instance = self.instance;
        let tour = match method {
            Method::Canonical => Tour::with_cost(
                Tour::canonical(instance.dimension()).into_cities(),
                instance,
            ),
            Method::NearestNeighbor => nearest_neighbor(instance),
            Method::RandomWalk => random_walk(instance, rng),
            Method::TwoOptNearestNeighbor => {
                let mut tour = nearest_neighbor(instance);
                two_opt(&mut tour, instance);
                tour
            }
            Method::TwoOptRandomWalk => {
                let mut tour = random_walk(instance, rng);
                two_opt(&mut tour, instance);
                tour
            }
            Method::Genetic | Method::GeneticDpx => {
                let crossover = method.crossover().unwrap_or_default();
                let config = self
                    .ga
                    .clone()
                    .with_crossover(crossover)
                    .with_two_opt_polish(true);
                GaRunner::run_with_rng(instance, &config, rng)?.best
            }
        };
        Ok(tour)
    }
}
