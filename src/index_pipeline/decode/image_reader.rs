//! Raster decoder backed by the `image` crate.
//!
//! Handles the everyday encodings an upload is likely to carry (PNG, JPEG, WebP, BMP,
//! GIF, ...). 8-bit and 16-bit layouts keep their stored depth. Float layouts are
//! nominally 0.0-1.0 in the `image` crate, so they are rescaled to the 16-bit range the
//! same way float camera RAW data is, keeping the low-signal threshold meaningful.

use image::{DynamicImage, ImageError};
use tracing::debug;

use crate::index_pipeline::common::error::DecodeError;
use crate::index_pipeline::decode::reader::RasterDecoder;
use crate::index_pipeline::decode::types::{RasterBuffer, SampleBuffer, unit_floats_to_u16};

#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateDecoder;

impl RasterDecoder for ImageCrateDecoder {
    fn decode(&self, data: &[u8]) -> Result<RasterBuffer, DecodeError> {
        debug!("Decoding image, {} bytes", data.len());

        let format = image::guess_format(data)
            .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;
        let decoded = image::load_from_memory_with_format(data, format).map_err(map_image_error)?;

        let width = decoded.width() as usize;
        let height = decoded.height() as usize;

        let (channels, samples) = match decoded {
            DynamicImage::ImageLuma8(img) => (1, SampleBuffer::U8(img.into_raw())),
            DynamicImage::ImageLumaA8(img) => (2, SampleBuffer::U8(img.into_raw())),
            DynamicImage::ImageRgb8(img) => (3, SampleBuffer::U8(img.into_raw())),
            DynamicImage::ImageRgba8(img) => (4, SampleBuffer::U8(img.into_raw())),
            DynamicImage::ImageLuma16(img) => (1, SampleBuffer::U16(img.into_raw())),
            DynamicImage::ImageLumaA16(img) => (2, SampleBuffer::U16(img.into_raw())),
            DynamicImage::ImageRgb16(img) => (3, SampleBuffer::U16(img.into_raw())),
            DynamicImage::ImageRgba16(img) => (4, SampleBuffer::U16(img.into_raw())),
            DynamicImage::ImageRgb32F(img) => (3, SampleBuffer::U16(unit_floats_to_u16(img.as_raw()))),
            DynamicImage::ImageRgba32F(img) => (4, SampleBuffer::U16(unit_floats_to_u16(img.as_raw()))),
            other => (4, SampleBuffer::U16(other.to_rgba16().into_raw())),
        };

        debug!(
            "Decoded {:?} image: {}x{}, {} channels, {} bits per sample",
            format,
            width,
            height,
            channels,
            samples.bits_per_sample()
        );

        RasterBuffer::new(width, height, channels, samples)
    }
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(e) => DecodeError::UnsupportedFormat(e.to_string()),
        other => DecodeError::Corrupt(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, Rgb32FImage, RgbImage};
    use std::io::Cursor;

    fn encode_png(img: &RgbImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_decodes_rgb_png() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 1, Rgb([10, 30, 50]));
        let raster = ImageCrateDecoder.decode(&encode_png(&img)).unwrap();

        assert_eq!((raster.width(), raster.height(), raster.channels()), (3, 2, 3));
        match raster.samples() {
            SampleBuffer::U8(samples) => assert_eq!(&samples[15..18], &[10, 30, 50]),
            other => panic!("unexpected sample layout: {:?}", other),
        }
    }

    #[test]
    fn test_float_layout_rescaled_to_u16() {
        let img = Rgb32FImage::from_pixel(2, 1, Rgb([0.25, 0.75, 0.0]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::OpenExr).unwrap();

        let raster = ImageCrateDecoder.decode(bytes.get_ref()).unwrap();
        assert_eq!(raster.channels(), 3);
        match raster.samples() {
            SampleBuffer::U16(samples) => assert_eq!(&samples[..3], &[16384, 49151, 0]),
            other => panic!("unexpected sample layout: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_signature() {
        let result = ImageCrateDecoder.decode(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_rejects_truncated_png() {
        let img = RgbImage::from_pixel(16, 16, Rgb([40, 90, 20]));
        let bytes = encode_png(&img);
        let result = ImageCrateDecoder.decode(&bytes[..bytes.len() / 2]);
        assert!(result.is_err());
    }
}
