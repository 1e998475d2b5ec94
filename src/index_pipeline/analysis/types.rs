//! Analysis configuration and result types

use serde::Serialize;

use crate::index_pipeline::aggregate::{Aggregate, DEFAULT_CALIBRATION_BIAS};
use crate::index_pipeline::classify::{Classification, ClassificationBasis};
use crate::index_pipeline::index::LOW_SIGNAL_THRESHOLD;

/// Configuration for vegetation index analysis
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Minimum `red + nir` for a pixel to be counted
    pub low_signal_threshold: f64,
    /// Offset added to the raw average before it is reported
    pub calibration_bias: f64,
    /// Whether the raw or the calibrated average is classified
    pub classification_basis: ClassificationBasis,
    /// Accumulate pixel chunks on the rayon pool of the calling thread
    pub parallel: bool,
    /// Whether to validate image dimensions after decoding
    pub validate_dimensions: bool,
    /// Largest accepted width or height
    pub max_dimension: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            low_signal_threshold: LOW_SIGNAL_THRESHOLD,
            calibration_bias: DEFAULT_CALIBRATION_BIAS,
            classification_basis: ClassificationBasis::default(),
            parallel: true,
            validate_dimensions: true,
            max_dimension: Some(50000),
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }
}

/// Builder for AnalysisConfig
#[derive(Default)]
pub struct AnalysisConfigBuilder {
    low_signal_threshold: Option<f64>,
    calibration_bias: Option<f64>,
    classification_basis: Option<ClassificationBasis>,
    parallel: Option<bool>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl AnalysisConfigBuilder {
    pub fn low_signal_threshold(mut self, threshold: f64) -> Self {
        self.low_signal_threshold = Some(threshold);
        self
    }

    pub fn calibration_bias(mut self, bias: f64) -> Self {
        self.calibration_bias = Some(bias);
        self
    }

    pub fn classification_basis(mut self, basis: ClassificationBasis) -> Self {
        self.classification_basis = Some(basis);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> AnalysisConfig {
        let default = AnalysisConfig::default();
        AnalysisConfig {
            low_signal_threshold: self.low_signal_threshold.unwrap_or(default.low_signal_threshold),
            calibration_bias: self.calibration_bias.unwrap_or(default.calibration_bias),
            classification_basis: self.classification_basis.unwrap_or(default.classification_basis),
            parallel: self.parallel.unwrap_or(default.parallel),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}

/// Outcome of one successful analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexResult {
    average_index: f64,
    raw_average: f64,
    sample_count: usize,
    classification: Classification,
}

impl IndexResult {
    pub(crate) fn new(aggregate: Aggregate, classification: Classification) -> Self {
        Self {
            average_index: aggregate.calibrated_average,
            raw_average: aggregate.raw_average,
            sample_count: aggregate.sample_count,
            classification,
        }
    }

    /// Calibrated average, the value that is reported.
    pub fn average_index(&self) -> f64 {
        self.average_index
    }

    pub fn raw_average(&self) -> f64 {
        self.raw_average
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// The calibrated average with exactly four fractional digits.
    ///
    /// Values exactly half-way between two four-digit decimals round away from zero.
    pub fn formatted_average(&self) -> String {
        format_fixed4(self.average_index)
    }

    pub fn report(&self) -> IndexReport {
        IndexReport {
            average_index: self.formatted_average(),
            sample_count: self.sample_count,
            classification: self.classification.label(),
        }
    }
}

/// Serializable form of [`IndexResult`] handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexReport {
    pub average_index: String,
    pub sample_count: usize,
    pub classification: &'static str,
}

/// `{:.4}` breaks exact ties to even; ties here round away from zero instead.
fn format_fixed4(value: f64) -> String {
    let magnitude = value.abs();
    let scaled = magnitude * 10_000.0;
    // The fused residual is zero only when `scaled` holds the product exactly.
    let exact = magnitude.mul_add(10_000.0, -scaled) == 0.0;

    if exact && scaled.fract() == 0.5 {
        format!("{:.4}", (scaled.ceil() / 10_000.0).copysign(value))
    } else {
        format!("{:.4}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed4_ties_round_away_from_zero() {
        assert_eq!(format_fixed4(0.03125), "0.0313");
        assert_eq!(format_fixed4(-0.03125), "-0.0313");
        assert_eq!(format_fixed4(0.00005), format!("{:.4}", 0.00005));
    }

    #[test]
    fn test_fixed4_plain_values() {
        assert_eq!(format_fixed4(0.701), "0.7010");
        assert_eq!(format_fixed4(0.201), "0.2010");
        assert_eq!(format_fixed4(-0.299), "-0.2990");
        assert_eq!(format_fixed4(1.2010), "1.2010");
    }
}
