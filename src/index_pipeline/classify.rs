//! Qualitative classification of an index value.

use std::fmt;

use crate::index_pipeline::aggregate::Aggregate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    NoVegetation,
    BarrenOrVerySparse,
    Sparse,
    Moderate,
    Dense,
    VeryDense,
}

/// Exclusive upper bounds, checked in order. Anything not below the last bound
/// (including NaN) is [`Classification::VeryDense`].
const UPPER_BOUNDS: [(f64, Classification); 5] = [
    (0.0, Classification::NoVegetation),
    (0.2, Classification::BarrenOrVerySparse),
    (0.4, Classification::Sparse),
    (0.6, Classification::Moderate),
    (0.8, Classification::Dense),
];

pub fn classify(value: f64) -> Classification {
    UPPER_BOUNDS
        .iter()
        .find(|(upper, _)| value < *upper)
        .map(|(_, class)| *class)
        .unwrap_or(Classification::VeryDense)
}

impl Classification {
    pub const ALL: [Classification; 6] = [
        Classification::NoVegetation,
        Classification::BarrenOrVerySparse,
        Classification::Sparse,
        Classification::Moderate,
        Classification::Dense,
        Classification::VeryDense,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Classification::NoVegetation => "No vegetation, likely water or artificial surfaces",
            Classification::BarrenOrVerySparse => "Barren soil or very sparse vegetation",
            Classification::Sparse => "Sparse vegetation, possibly grassland or shrubs",
            Classification::Moderate => "Moderate vegetation density",
            Classification::Dense => "Dense vegetation",
            Classification::VeryDense => "Very dense, healthy vegetation",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which average the classifier is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassificationBasis {
    /// The mean index before the calibration bias.
    Raw,
    /// The reported, bias-corrected average.
    #[default]
    Calibrated,
}

impl ClassificationBasis {
    pub fn select(&self, aggregate: &Aggregate) -> f64 {
        match self {
            ClassificationBasis::Raw => aggregate.raw_average,
            ClassificationBasis::Calibrated => aggregate.calibrated_average,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries_are_lower_inclusive() {
        assert_eq!(classify(-0.0001), Classification::NoVegetation);
        assert_eq!(classify(0.0), Classification::BarrenOrVerySparse);
        assert_eq!(classify(0.1999), Classification::BarrenOrVerySparse);
        assert_eq!(classify(0.2), Classification::Sparse);
        assert_eq!(classify(0.4), Classification::Moderate);
        assert_eq!(classify(0.6), Classification::Dense);
        assert_eq!(classify(0.8), Classification::VeryDense);
        assert_eq!(classify(1.2), Classification::VeryDense);
        assert_eq!(classify(-5.0), Classification::NoVegetation);
    }

    #[test]
    fn test_table_is_total() {
        assert_eq!(classify(f64::NAN), Classification::VeryDense);
        assert_eq!(classify(f64::NEG_INFINITY), Classification::NoVegetation);
        assert_eq!(classify(f64::INFINITY), Classification::VeryDense);
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            Classification::Sparse.to_string(),
            "Sparse vegetation, possibly grassland or shrubs"
        );
        let labels: std::collections::HashSet<_> =
            Classification::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), 6);
    }

    #[test]
    fn test_basis_selects_average() {
        let aggregate = Aggregate {
            raw_average: 0.5,
            calibrated_average: 0.701,
            sample_count: 1,
        };
        assert_eq!(classify(ClassificationBasis::Raw.select(&aggregate)), Classification::Moderate);
        assert_eq!(
            classify(ClassificationBasis::default().select(&aggregate)),
            Classification::Dense
        );
    }
}
