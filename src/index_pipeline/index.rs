//! Normalized difference index module
//!
//! Per-pixel index computation and the running statistic it feeds.

mod accumulator;
mod calculator;

pub use accumulator::IndexAccumulator;
pub use calculator::{IndexCalculator, LOW_SIGNAL_THRESHOLD, normalized_difference};
