//! Raster decoder backed by the `tiff` crate.
//!
//! Unlike the general-purpose image decoder, this one accepts any number of bands per
//! pixel, which is how multispectral cameras usually ship their captures (for example
//! blue, green, red, red-edge and near-infrared in one chunky TIFF). The band count is
//! derived from the decoded sample count rather than the photometric interpretation.
//!
//! Float TIFFs carry no nominal range (reflectance, radiance and raw counts are all
//! common), so their samples are passed through unscaled.

use std::io::Cursor;

use tiff::TiffError;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::index_pipeline::common::error::DecodeError;
use crate::index_pipeline::decode::reader::RasterDecoder;
use crate::index_pipeline::decode::types::{RasterBuffer, SampleBuffer};

#[derive(Debug, Default, Clone, Copy)]
pub struct TiffRasterDecoder;

impl RasterDecoder for TiffRasterDecoder {
    fn decode(&self, data: &[u8]) -> Result<RasterBuffer, DecodeError> {
        debug!("Decoding TIFF, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data)).map_err(map_tiff_error)?;
        let (width, height) = decoder.dimensions().map_err(map_tiff_error)?;
        let (width, height) = (width as usize, height as usize);
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions(width, height));
        }

        let samples = match decoder.read_image().map_err(map_tiff_error)? {
            DecodingResult::U8(values) => SampleBuffer::U8(values),
            DecodingResult::U16(values) => SampleBuffer::U16(values),
            DecodingResult::F32(values) => SampleBuffer::F32(values),
            _ => {
                return Err(DecodeError::UnsupportedFormat(
                    "TIFF sample format other than u8, u16 or f32".to_string(),
                ));
            }
        };

        let pixels = width * height;
        if samples.len() % pixels != 0 {
            return Err(DecodeError::Corrupt(format!(
                "{} samples do not divide into {} pixels",
                samples.len(),
                pixels
            )));
        }
        let channels = samples.len() / pixels;

        debug!(
            "Decoded TIFF: {}x{}, {} bands, {} bits per sample",
            width,
            height,
            channels,
            samples.bits_per_sample()
        );

        RasterBuffer::new(width, height, channels, samples)
    }
}

fn map_tiff_error(err: TiffError) -> DecodeError {
    match err {
        TiffError::UnsupportedError(e) => DecodeError::UnsupportedFormat(e.to_string()),
        other => DecodeError::Corrupt(other.to_string()),
    }
}
