use std::fmt;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unsupported raster encoding: {0}")]
    UnsupportedFormat(String),

    #[error("Truncated or corrupt image data: {0}")]
    Corrupt(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Image dimensions {width}x{height} exceed maximum {max}")]
    TooLarge { width: usize, height: usize, max: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Band extraction needs {required} channels, raster has {available}")]
pub struct InsufficientChannelsError {
    pub required: usize,
    pub available: usize,
}

/// Pipeline stage a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Input,
    Decode,
    BandExtraction,
    Compute,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Input => "input",
            Stage::Decode => "decode",
            Stage::BandExtraction => "band-extraction",
            Stage::Compute => "compute",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input file: {0}")]
    InputRead(String),

    #[error("decode stage failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("band-extraction stage failed: {0}")]
    BandExtraction(#[from] InsufficientChannelsError),

    #[error("Compute worker unavailable: {0}")]
    WorkerUnavailable(String),

    #[error("Analysis did not finish within {0:?}")]
    TimedOut(Duration),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::InputRead(_) => Stage::Input,
            PipelineError::Decode(_) => Stage::Decode,
            PipelineError::BandExtraction(_) => Stage::BandExtraction,
            PipelineError::WorkerUnavailable(_) | PipelineError::TimedOut(_) => Stage::Compute,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
