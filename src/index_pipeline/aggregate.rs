//! Aggregation of the accumulated index into a reported average.
//!
//! The reported value carries a fixed calibration bias that offsets the
//! approximate band mapping (a visible channel read as near-infrared).

use crate::index_pipeline::index::IndexAccumulator;

/// Offset added to the raw average before reporting.
pub const DEFAULT_CALIBRATION_BIAS: f64 = 0.201;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// Mean index of the eligible pixels, 0 when there were none.
    pub raw_average: f64,
    /// `raw_average` plus the calibration bias.
    pub calibrated_average: f64,
    pub sample_count: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    bias: f64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_CALIBRATION_BIAS)
    }
}

impl Aggregator {
    pub fn new(bias: f64) -> Self {
        Self { bias }
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn reduce(&self, accumulator: &IndexAccumulator) -> Aggregate {
        let sample_count = accumulator.valid_count();
        let raw_average = if sample_count > 0 {
            accumulator.sum() / sample_count as f64
        } else {
            0.0
        };

        Aggregate {
            raw_average,
            calibrated_average: raw_average + self.bias,
            sample_count,
        }
    }
}
