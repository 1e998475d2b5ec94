//! Vegetation index pipeline module
//!
//! This module turns an encoded image into a vegetation index estimate. Each stage
//! lives in its own module: raster decoding, band extraction, the per-pixel index
//! loop, aggregation, classification, and the orchestration that ties them together.

pub mod common;
pub mod decode;
pub mod bands;
pub mod index;
pub mod aggregate;
pub mod classify;
pub mod analysis;

pub use common::{
    DecodeError,
    InsufficientChannelsError,
    PipelineError,
    Stage,
    Result,
    PipelineTimings,
    StepTiming,
    Timer,
};

pub use decode::{
    RasterBuffer,
    SampleBuffer,
    RasterDecoder,
    ImageCrateDecoder,
    TiffRasterDecoder,
    CameraRawDecoder,
    AutoDecoder,
};

pub use bands::{
    BandMapping,
    ChannelBandMapping,
    BandPair,
    BandExtractor,
    ChannelSelection,
};

pub use index::{
    IndexAccumulator,
    IndexCalculator,
    LOW_SIGNAL_THRESHOLD,
};

pub use aggregate::{
    Aggregate,
    Aggregator,
    DEFAULT_CALIBRATION_BIAS,
};

pub use classify::{
    Classification,
    ClassificationBasis,
    classify,
};

pub use analysis::{
    AnalysisConfig,
    AnalysisConfigBuilder,
    IndexResult,
    IndexReport,
    NdviPipeline,
    ComputePool,
    PendingAnalysis,
};
