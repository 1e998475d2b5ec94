//! Raster decoding module
//!
//! This module turns encoded image bytes into a [`RasterBuffer`]: a flat,
//! channel-interleaved, row-major sample sequence with known geometry.

mod reader;
mod image_reader;
mod tiff_reader;
mod rawloader_reader;
mod auto_reader;
pub mod types;

pub use reader::RasterDecoder;
pub use image_reader::ImageCrateDecoder;
pub use tiff_reader::TiffRasterDecoder;
pub use rawloader_reader::CameraRawDecoder;
pub use auto_reader::AutoDecoder;
pub use types::{RasterBuffer, SampleBuffer};
