//! Fixed-size pool of tours with a parallel cost array.

use crate::construct::random_walk;
use crate::error::{Result, TspError};
use crate::instance::Instance;
use crate::tour::Tour;
use rand::Rng;

/// The GA working population.
///
/// `costs[i]` always equals `tours[i].cost()`. Every mutating method keeps
/// the two in step.
#[derive(Debug, Clone)]
pub struct Population {
    tours: Vec<Tour>,
    costs: Vec<f64>,
}

impl Population {
    /// Allocates `size` canonical tours of `dimension` cities with zero costs.
    ///
    /// Allocation failure is reported as [`TspError::Allocation`]; whatever
    /// was built so far is dropped.
    pub fn new(size: usize, dimension: usize) -> Result<Self> {
        if size == 0 {
            return Err(TspError::invalid_config("population size must be positive"));
        }

        let mut tours = Vec::new();
        tours.try_reserve_exact(size)?;
        for _ in 0..size {
            let mut order = Vec::new();
            order.try_reserve_exact(dimension)?;
            order.extend(1..=dimension);
            tours.push(Tour::from_order(order));
        }

        let mut costs = Vec::new();
        costs.try_reserve_exact(size)?;
        costs.resize(size, 0.0);

        Ok(Self { tours, costs })
    }

    /// Allocates and fills a population of random-walk tours.
    pub fn random<R: Rng>(size: usize, instance: &Instance, rng: &mut R) -> Result<Self> {
        let mut population = Self::new(size, instance.dimension())?;
        population.initialize(instance, rng)?;
        Ok(population)
    }

    /// Overwrites every slot with a freshly built random-walk tour.
    pub fn initialize<R: Rng>(&mut self, instance: &Instance, rng: &mut R) -> Result<()> {
        let dimension = self.dimension();
        if dimension != instance.dimension() {
            return Err(TspError::DimensionMismatch {
                expected: dimension,
                found: instance.dimension(),
            });
        }

        for (tour, cost) in self.tours.iter_mut().zip(self.costs.iter_mut()) {
            let fresh = random_walk(instance, rng);
            tour.copy_from(&fresh);
            *cost = tour.cost();
        }
        Ok(())
    }

    /// Recomputes every slot's cost from scratch.
    pub fn evaluate(&mut self, instance: &Instance) {
        for (tour, cost) in self.tours.iter_mut().zip(self.costs.iter_mut()) {
            *cost = tour.evaluate(instance);
        }
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// Cities per tour.
    pub fn dimension(&self) -> usize {
        self.tours.first().map_or(0, Tour::len)
    }

    pub fn tour(&self, index: usize) -> &Tour {
        &self.tours[index]
    }

    pub fn cost(&self, index: usize) -> f64 {
        self.costs[index]
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Index of the lowest cost. Ties go to the first occurrence.
    pub fn best_index(&self) -> usize {
        let mut best = 0;
        for (i, &cost) in self.costs.iter().enumerate().skip(1) {
            if cost < self.costs[best] {
                best = i;
            }
        }
        best
    }

    /// Index of the highest cost. Ties go to the first occurrence.
    pub fn worst_index(&self) -> usize {
        let mut worst = 0;
        for (i, &cost) in self.costs.iter().enumerate().skip(1) {
            if cost > self.costs[worst] {
                worst = i;
            }
        }
        worst
    }

    pub fn best(&self) -> &Tour {
        &self.tours[self.best_index()]
    }

    /// Puts `tour` in slot `index` and returns the previous occupant.
    pub fn replace(&mut self, index: usize, tour: Tour) -> Tour {
        self.costs[index] = tour.cost();
        std::mem::replace(&mut self.tours[index], tour)
    }

    /// Copies `tour` into slot `index` without reallocating.
    ///
    /// Returns `false` and leaves the slot untouched on a size mismatch.
    pub fn overwrite_with(&mut self, index: usize, tour: &Tour) -> bool {
        if !self.tours[index].copy_from(tour) {
            return false;
        }
        self.costs[index] = tour.cost();
        true
    }

    /// Two distinct slot indices drawn uniformly.
    ///
    /// # Panics
    /// Panics if the population holds fewer than two tours.
    pub fn select_two_parents<R: Rng>(&self, rng: &mut R) -> (usize, usize) {
        let n = self.len();
        assert!(n >= 2, "need at least two tours to pick distinct parents");
        let first = rng.random_range(0..n);
        // Draw from the other n - 1 slots and skip over `first`.
        let mut second = rng.random_range(0..n - 1);
        if second >= first {
            second += 1;
        }
        (first, second)
    }
}
