//! TSPLIB distance functions.
//!
//! All three metrics reproduce the TSPLIB integer conventions exactly:
//! EUC_2D rounds, GEO truncates after adding one, ATT rounds up only when
//! the pseudo-Euclidean value has a fractional part.
//!
//! # References
//!
//! - Reinelt (1991), "TSPLIB: A Traveling Salesman Problem Library"

use crate::error::TspError;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Earth radius used by the TSPLIB GEO metric, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6378.388;

/// A city record: a stable 1-based identifier and two coordinates.
///
/// For [`DistanceMetric::Geo`] the coordinates are latitude/longitude in
/// `DDD.MM` (degrees.minutes) notation, otherwise planar x/y.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

impl City {
    pub const fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// The distance convention of an instance (TSPLIB `EDGE_WEIGHT_TYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceMetric {
    /// `EUC_2D`: Euclidean distance rounded to the nearest integer.
    #[default]
    Euclidean,
    /// `GEO`: great-circle distance on the TSPLIB idealised sphere.
    Geo,
    /// `ATT`: pseudo-Euclidean distance.
    Att,
}

impl DistanceMetric {
    /// Distance between two cities under this metric.
    pub fn distance(self, a: &City, b: &City) -> f64 {
        match self {
            DistanceMetric::Euclidean => euclidean_2d(a, b),
            DistanceMetric::Geo => geo(a, b),
            DistanceMetric::Att => att(a, b),
        }
    }

    /// The TSPLIB keyword for this metric.
    pub fn tag(self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "EUC_2D",
            DistanceMetric::Geo => "GEO",
            DistanceMetric::Att => "ATT",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DistanceMetric {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUC_2D" => Ok(DistanceMetric::Euclidean),
            "GEO" => Ok(DistanceMetric::Geo),
            "ATT" => Ok(DistanceMetric::Att),
            other => Err(TspError::UnknownMetric(other.to_string())),
        }
    }
}

/// `EUC_2D`: `nint(sqrt(dx² + dy²))`.
pub fn euclidean_2d(a: &City, b: &City) -> f64 {
    let xd = a.x - b.x;
    let yd = a.y - b.y;
    (xd * xd + yd * yd).sqrt().round()
}

/// `GEO`: spherical law of cosines on `DDD.MM` coordinates.
///
/// Each coordinate is converted to radians as `π·(deg + 5·min/3)/180`
/// where `deg` is the integer part and `min` the fractional part. The
/// result is `floor(R·angle + 1)`, so two distinct cities are always at
/// least one kilometre apart.
pub fn geo(a: &City, b: &City) -> f64 {
    let lat1 = geo_radians(a.x);
    let lon1 = geo_radians(a.y);
    let lat2 = geo_radians(b.x);
    let lon2 = geo_radians(b.y);

    let q1 = (lon1 - lon2).cos();
    let q2 = (lat1 - lat2).cos();
    let q3 = (lat1 + lat2).cos();
    let cos_angle = (0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3)).clamp(-1.0, 1.0);

    (EARTH_RADIUS_KM * cos_angle.acos() + 1.0).trunc()
}

fn geo_radians(coordinate: f64) -> f64 {
    let deg = coordinate.trunc();
    let min = coordinate - deg;
    PI * (deg + 5.0 * min / 3.0) / 180.0
}

/// `ATT`: `r = sqrt((dx² + dy²) / 10)`, rounded up unless already integral.
pub fn att(a: &City, b: &City) -> f64 {
    let xd = a.x - b.x;
    let yd = a.y - b.y;
    let rij = ((xd * xd + yd * yd) / 10.0).sqrt();
    let tij = rij.trunc();
    if tij < rij {
        tij + 1.0
    } else {
        tij
    }
}
