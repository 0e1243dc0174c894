//! TSPLIB reader for symmetric coordinate instances.

use super::{City, DistanceMetric, Instance};
use crate::error::{Result, TspError};
use std::path::Path;

impl Instance {
    /// Reads a TSPLIB file.
    pub fn from_tsplib_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let instance = Self::from_tsplib_str(&text)?;
        log::debug!(
            "loaded {} from {}: {} cities, {}",
            instance.name(),
            path.display(),
            instance.dimension(),
            instance.metric()
        );
        Ok(instance)
    }

    /// Parses TSPLIB text.
    ///
    /// Supports the `NAME`, `COMMENT`, `TYPE`, `DIMENSION` and
    /// `EDGE_WEIGHT_TYPE` header keys followed by a `NODE_COORD_SECTION`
    /// of `<id> <x> <y>` lines. Parsing stops at `EOF` or end of input.
    /// Other header keys are ignored.
    pub fn from_tsplib_str(text: &str) -> Result<Self> {
        let mut name = String::new();
        let mut comment = String::new();
        let mut dimension: Option<usize> = None;
        let mut metric = DistanceMetric::default();
        let mut cities: Vec<City> = Vec::new();
        let mut in_coords = false;
        let mut saw_coords = false;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line == "EOF" {
                break;
            }

            if in_coords && line.starts_with(|c: char| c.is_ascii_digit()) {
                let city = parse_city(line, line_no)?;
                if city.id != cities.len() + 1 {
                    return Err(TspError::parse(
                        line_no,
                        format!("city id {} out of sequence, expected {}", city.id, cities.len() + 1),
                    ));
                }
                cities.push(city);
                continue;
            }

            let (key, value) = split_header(line);
            match key {
                "NODE_COORD_SECTION" => {
                    let n = dimension.ok_or_else(|| {
                        TspError::parse(line_no, "NODE_COORD_SECTION before DIMENSION")
                    })?;
                    cities.try_reserve_exact(n)?;
                    in_coords = true;
                    saw_coords = true;
                }
                "NAME" => name = value.to_string(),
                "COMMENT" => {
                    if !comment.is_empty() {
                        comment.push('\n');
                    }
                    comment.push_str(value);
                }
                "TYPE" => {
                    if value != "TSP" {
                        return Err(TspError::parse(
                            line_no,
                            format!("unsupported problem type '{value}', only TSP is handled"),
                        ));
                    }
                }
                "DIMENSION" => {
                    let n = value.parse::<usize>().map_err(|_| {
                        TspError::parse(line_no, format!("invalid DIMENSION '{value}'"))
                    })?;
                    dimension = Some(n);
                }
                "EDGE_WEIGHT_TYPE" => metric = value.parse()?,
                _ => {
                    in_coords = false;
                    log::trace!("ignoring TSPLIB key {key} on line {line_no}");
                }
            }
        }

        let dimension =
            dimension.ok_or_else(|| TspError::parse(text.lines().count(), "missing DIMENSION"))?;
        if !saw_coords {
            return Err(TspError::parse(
                text.lines().count(),
                "missing NODE_COORD_SECTION",
            ));
        }
        if cities.len() != dimension {
            return Err(TspError::DimensionMismatch {
                expected: dimension,
                found: cities.len(),
            });
        }

        Ok(Instance::new(name, cities, metric)?.with_comment(comment))
    }
}

/// Splits `KEY : value`, `KEY: value` or a bare `KEY`.
fn split_header(line: &str) -> (&str, &str) {
    match line.split_once(':') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => (line.trim(), ""),
    }
}

fn parse_city(line: &str, line_no: usize) -> Result<City> {
    let mut fields = line.split_whitespace();
    let mut next = |what: &str| {
        fields
            .next()
            .ok_or_else(|| TspError::parse(line_no, format!("missing {what}")))
    };
    let id_field = next("city id")?;
    let x_field = next("x coordinate")?;
    let y_field = next("y coordinate")?;

    let id = id_field
        .parse::<usize>()
        .map_err(|_| TspError::parse(line_no, format!("invalid city id '{id_field}'")))?;
    let x = x_field
        .parse::<f64>()
        .map_err(|_| TspError::parse(line_no, format!("invalid coordinate '{x_field}'")))?;
    let y = y_field
        .parse::<f64>()
        .map_err(|_| TspError::parse(line_no, format!("invalid coordinate '{y_field}'")))?;
    Ok(City::new(id, x, y))
}
