//! Band extraction module
//!
//! Maps decoded channels onto the two logical bands the vegetation index needs.

mod mapping;
mod extractor;
pub mod types;

pub use mapping::{BandMapping, ChannelBandMapping};
pub use extractor::{BandExtractor, ChannelSelection, MIN_CHANNELS};
pub use types::BandPair;
