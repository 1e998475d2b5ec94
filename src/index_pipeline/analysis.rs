//! Analysis orchestration module
//!
//! This module sequences decoding, band extraction, index accumulation, aggregation
//! and classification, and offers a dedicated compute pool to run them on.

mod types;
mod ndvi;
mod worker;


pub use types::{AnalysisConfig, AnalysisConfigBuilder, IndexResult, IndexReport};
pub use ndvi::NdviPipeline;
pub use worker::{ComputePool, PendingAnalysis};
