//! Problem instances.
//!
//! An [`Instance`] owns the ordered city list, the selected
//! [`DistanceMetric`], and an optional [`DistanceMatrix`] cache. It is the
//! distance provider every algorithm in the crate queries.
//!
//! # Submodules
//!
//! - [`distance`]: the three TSPLIB metrics
//! - [`matrix`]: flat lower-triangular cost cache
//! - TSPLIB reader: [`Instance::from_tsplib_str`], [`Instance::from_tsplib_file`]

pub mod distance;
pub mod matrix;
mod tsplib;

pub use distance::{City, DistanceMetric};
pub use matrix::DistanceMatrix;

use crate::error::{Result, TspError};

/// A symmetric TSP instance.
///
/// City identifiers are 1-based and equal to the city's position in the
/// list plus one. If a matrix is present it was computed from the current
/// metric: [`set_metric`](Self::set_metric) rebuilds it.
#[derive(Debug, Clone)]
pub struct Instance {
    name: String,
    comment: String,
    cities: Vec<City>,
    metric: DistanceMetric,
    matrix: Option<DistanceMatrix>,
}

impl Instance {
    /// Creates an instance without a precomputed matrix.
    ///
    /// Fails if the list is empty or the ids are not exactly `1..=n` in order.
    pub fn new(name: impl Into<String>, cities: Vec<City>, metric: DistanceMetric) -> Result<Self> {
        if cities.is_empty() {
            return Err(TspError::invalid_config("instance has no cities"));
        }
        if let Some((pos, city)) = cities
            .iter()
            .enumerate()
            .find(|(pos, city)| city.id != pos + 1)
        {
            return Err(TspError::invalid_config(format!(
                "city at position {pos} has id {}, expected {}",
                city.id,
                pos + 1
            )));
        }
        Ok(Self {
            name: name.into(),
            comment: String::new(),
            cities,
            metric,
            matrix: None,
        })
    }

    /// Builds an instance from planar coordinates, numbering cities from 1.
    pub fn from_coords(
        name: impl Into<String>,
        coords: &[(f64, f64)],
        metric: DistanceMetric,
    ) -> Result<Self> {
        let cities = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| City::new(i + 1, x, y))
            .collect();
        Self::new(name, cities, metric)
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Number of cities.
    pub fn dimension(&self) -> usize {
        self.cities.len()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// The city with 1-based identifier `id`.
    ///
    /// # Panics
    /// Panics if `id` is 0 or greater than the dimension.
    pub fn city(&self, id: usize) -> &City {
        &self.cities[id - 1]
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Switches metric. An existing matrix is rebuilt from scratch.
    pub fn set_metric(&mut self, metric: DistanceMetric) {
        if metric == self.metric {
            return;
        }
        self.metric = metric;
        if self.matrix.is_some() {
            self.build_matrix();
        }
    }

    /// Computes (or recomputes) the pairwise cost matrix.
    pub fn build_matrix(&mut self) {
        self.matrix = Some(DistanceMatrix::build(&self.cities, self.metric));
    }

    /// Consuming variant of [`build_matrix`](Self::build_matrix).
    pub fn with_matrix(mut self) -> Self {
        self.build_matrix();
        self
    }

    pub fn clear_matrix(&mut self) {
        self.matrix = None;
    }

    pub fn has_matrix(&self) -> bool {
        self.matrix.is_some()
    }

    pub fn matrix(&self) -> Option<&DistanceMatrix> {
        self.matrix.as_ref()
    }

    /// Cost between the cities with 1-based ids `a` and `b`.
    ///
    /// Reads the matrix when present, otherwise applies the metric. A city
    /// is always at distance 0 from itself, whichever path is taken.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        if a == b {
            return 0.0;
        }
        match &self.matrix {
            Some(matrix) => matrix.get(a - 1, b - 1),
            None => self.metric.distance(self.city(a), self.city(b)),
        }
    }

    /// Cost between two cities computed from coordinates, bypassing the matrix.
    pub fn direct_distance(&self, a: usize, b: usize) -> f64 {
        if a == b {
            return 0.0;
        }
        self.metric.distance(self.city(a), self.city(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Instance {
        Instance::from_coords(
            "square",
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
            DistanceMetric::Euclidean,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Instance::new("empty", vec![], DistanceMetric::Euclidean).is_err());
    }

    #[test]
    fn test_rejects_out_of_order_ids() {
        let cities = vec![City::new(2, 0.0, 0.0), City::new(1, 1.0, 1.0)];
        let err = Instance::new("bad", cities, DistanceMetric::Euclidean).unwrap_err();
        assert!(matches!(err, TspError::InvalidConfig(_)));
    }

    #[test]
    fn test_matrix_and_direct_agree() {
        let mut inst = square();
        let direct: Vec<f64> = (1..=4)
            .flat_map(|a| (1..=4).map(move |b| (a, b)))
            .filter(|(a, b)| a != b)
            .map(|(a, b)| inst.distance(a, b))
            .collect();
        inst.build_matrix();
        assert!(inst.has_matrix());
        let cached: Vec<f64> = (1..=4)
            .flat_map(|a| (1..=4).map(move |b| (a, b)))
            .filter(|(a, b)| a != b)
            .map(|(a, b)| inst.distance(a, b))
            .collect();
        assert_eq!(direct, cached);
    }

    #[test]
    fn test_set_metric_rebuilds_matrix() {
        let mut inst = square().with_matrix();
        assert_eq!(inst.distance(1, 3), 14.0);
        inst.set_metric(DistanceMetric::Att);
        assert_eq!(inst.matrix().unwrap().metric(), DistanceMetric::Att);
        // sqrt(200 / 10) = 4.47 -> 5
        assert_eq!(inst.distance(1, 3), 5.0);
        assert_eq!(inst.distance(1, 3), inst.direct_distance(1, 3));
    }

    #[test]
    fn test_set_metric_without_matrix_stays_lazy() {
        let mut inst = square();
        inst.set_metric(DistanceMetric::Att);
        assert!(!inst.has_matrix());
    }

    #[test]
    fn test_self_distance_is_zero_on_both_paths() {
        // GEO puts two distinct points at least 1 apart; a city and itself
        // must still cost 0 with or without the matrix.
        let mut inst =
            Instance::from_coords("one", &[(16.47, 96.10)], DistanceMetric::Geo).unwrap();
        assert_eq!(inst.distance(1, 1), 0.0);
        assert_eq!(inst.direct_distance(1, 1), 0.0);
        let direct = crate::tour::tour_length(&[1], &inst);

        inst.build_matrix();
        assert_eq!(inst.distance(1, 1), 0.0);
        assert_eq!(crate::tour::tour_length(&[1], &inst), direct);
        assert_eq!(direct, 0.0);
    }

    #[test]
    fn test_clear_matrix() {
        let mut inst = square().with_matrix();
        inst.clear_matrix();
        assert!(inst.matrix().is_none());
    }
}
