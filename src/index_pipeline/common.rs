//! Common utilities module
//!
//! This module contains the error taxonomy and stage timing helpers shared across the
//! index pipeline.

pub mod error;
pub mod timing;

pub use error::{DecodeError, InsufficientChannelsError, PipelineError, Stage, Result};
pub use timing::{PipelineTimings, StepTiming, Timer};
