//! Tour-improvement local search.
//!
//! - [`two_opt`]: in-place 2-opt to a local optimum, returns whether it improved
//! - [`TwoOpt`]: configurable searcher returning [`TwoOptOutcome`] statistics

mod two_opt;

pub use two_opt::{gain, two_opt, TwoOpt, TwoOptConfig, TwoOptOutcome};
