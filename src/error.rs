//! Error type shared by every module of the crate.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors produced while loading instances, configuring algorithms, or
/// allocating working sets.
#[derive(Debug, Error)]
pub enum TspError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed TSPLIB input. `line` is 1-based.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unknown distance metric '{0}' (expected EUC_2D, GEO or ATT)")]
    UnknownMetric(String),

    #[error("unknown method '{0}' (expected c, nn, rw, 2optnn, 2optrw, ga or gadpx)")]
    UnknownMethod(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

impl TspError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TspError>;
