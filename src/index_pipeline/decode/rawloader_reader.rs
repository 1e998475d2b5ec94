//! Camera RAW decoder using the rawloader library.
//!
//! This module provides support for reading RAW formats (ARW, CR2, NEF, DNG, RAF, etc.)
//! through rawloader. Single-component Bayer mosaics are black-level corrected and
//! demosaiced to interleaved RGB with the `bayer` crate, so the result has the three
//! channels band extraction expects. Sensors that already deliver three components per
//! pixel are passed through as-is.

use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::index_pipeline::common::error::DecodeError;
use crate::index_pipeline::decode::reader::RasterDecoder;
use crate::index_pipeline::decode::types::{RasterBuffer, SampleBuffer, unit_floats_to_u16};

/// RGB channels produced by demosaicing.
const RGB_CHANNELS: usize = 3;

#[derive(Debug, Default, Clone, Copy)]
pub struct CameraRawDecoder;

impl RasterDecoder for CameraRawDecoder {
    /// Reads and decodes camera RAW data from a byte array.
    ///
    /// Integer sensor data has the smallest black level subtracted; float data
    /// (normalized 0.0-1.0) is scaled to the u16 range.
    fn decode(&self, data: &[u8]) -> Result<RasterBuffer, DecodeError> {
        debug!("Decoding camera RAW, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

        let width = decoded.width;
        let height = decoded.height;
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions(width, height));
        }

        debug!(
            "Decoded RAW from {} {}: {}x{}, cpp={}, cfa={}",
            decoded.make, decoded.model, width, height, decoded.cpp, decoded.cfa.name
        );

        let black_level = decoded.blacklevels.iter().min().copied().unwrap_or(0);
        let values: Vec<u16> = match decoded.data {
            RawloaderImageData::Integer(values) => values
                .iter()
                .map(|&v| v.saturating_sub(black_level))
                .collect(),
            RawloaderImageData::Float(values) => unit_floats_to_u16(&values),
        };

        match decoded.cpp {
            1 => demosaic(width, height, &decoded.cfa.name, &values),
            RGB_CHANNELS => RasterBuffer::new(width, height, RGB_CHANNELS, SampleBuffer::U16(values)),
            cpp => Err(DecodeError::UnsupportedFormat(format!(
                "{} components per pixel",
                cpp
            ))),
        }
    }
}

fn demosaic(
    width: usize,
    height: usize,
    cfa_name: &str,
    mosaic: &[u16],
) -> Result<RasterBuffer, DecodeError> {
    let cfa = match cfa_name {
        "RGGB" => CFA::RGGB,
        "BGGR" => CFA::BGGR,
        "GRBG" => CFA::GRBG,
        "GBRG" => CFA::GBRG,
        other => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "color filter array {:?}",
                other
            )));
        }
    };

    if mosaic.len() != width * height {
        return Err(DecodeError::Corrupt(format!(
            "mosaic has {} samples, expected {}",
            mosaic.len(),
            width * height
        )));
    }

    let bayer_bytes: Vec<u8> = mosaic.iter().flat_map(|&v| v.to_le_bytes()).collect();
    let mut output_buf = vec![0u8; width * height * RGB_CHANNELS * 2];

    debug!("Running demosaic with CFA={}, algo=Linear", cfa_name);
    {
        let mut output_raster = RasterMut::new(width, height, RasterDepth::Depth16, &mut output_buf);
        bayer::run_demosaic(
            &mut Cursor::new(&bayer_bytes[..]),
            BayerDepth::Depth16LE,
            cfa,
            Demosaic::Linear,
            &mut output_raster,
        )
        .map_err(|e| DecodeError::Corrupt(format!("demosaic failed: {:?}", e)))?;
    }

    // The 16-bit raster is written in native byte order.
    let rgb: Vec<u16> = output_buf
        .chunks_exact(2)
        .map(|b| u16::from_ne_bytes([b[0], b[1]]))
        .collect();

    RasterBuffer::new(width, height, RGB_CHANNELS, SampleBuffer::U16(rgb))
}
