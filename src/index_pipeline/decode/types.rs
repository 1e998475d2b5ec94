//! Decoded raster types

use crate::index_pipeline::common::error::DecodeError;

/// Per-channel samples in their native numeric type.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

impl SampleBuffer {
    pub fn len(&self) -> usize {
        match self {
            SampleBuffer::U8(v) => v.len(),
            SampleBuffer::U16(v) => v.len(),
            SampleBuffer::F32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bits_per_sample(&self) -> u32 {
        match self {
            SampleBuffer::U8(_) => 8,
            SampleBuffer::U16(_) => 16,
            SampleBuffer::F32(_) => 32,
        }
    }
}

/// Rescales nominal 0.0-1.0 float samples to the full u16 range, clamping outliers.
pub(crate) fn unit_floats_to_u16(values: &[f32]) -> Vec<u16> {
    values
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * u16::MAX as f32).round() as u16)
        .collect()
}

/// Decoded raster owned by a single pipeline invocation.
///
/// Samples are channel-interleaved and row-major: the sample for channel `c` of the
/// pixel at `(x, y)` lives at `(y * width + x) * channels + c`. The constructor
/// guarantees non-zero dimensions and a sample count matching the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    channels: usize,
    samples: SampleBuffer,
}

impl RasterBuffer {
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        samples: SampleBuffer,
    ) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions(width, height));
        }
        if channels == 0 {
            return Err(DecodeError::Corrupt("raster declares zero channels".to_string()));
        }

        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(channels))
            .ok_or_else(|| {
                DecodeError::Corrupt(format!(
                    "sample count overflows for {}x{}x{}",
                    width, height, channels
                ))
            })?;
        if samples.len() != expected {
            return Err(DecodeError::Corrupt(format!(
                "expected {} samples for {}x{}x{}, found {}",
                expected,
                width,
                height,
                channels,
                samples.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_geometry() {
        let raster = RasterBuffer::new(2, 1, 2, SampleBuffer::U8(vec![10, 30, 0, 0])).unwrap();
        assert_eq!(raster.pixel_count(), 2);
        assert_eq!(raster.channels(), 2);
        assert_eq!(raster.samples().bits_per_sample(), 8);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let result = RasterBuffer::new(0, 4, 3, SampleBuffer::U8(Vec::new()));
        assert!(matches!(result, Err(DecodeError::InvalidDimensions(0, 4))));
    }

    #[test]
    fn test_sample_count_mismatch_rejected() {
        let result = RasterBuffer::new(2, 2, 3, SampleBuffer::U16(vec![0; 11]));
        assert!(matches!(result, Err(DecodeError::Corrupt(_))));
    }

    #[test]
    fn test_zero_channels_rejected() {
        let result = RasterBuffer::new(1, 1, 0, SampleBuffer::F32(Vec::new()));
        assert!(matches!(result, Err(DecodeError::Corrupt(_))));
    }

    #[test]
    fn test_unit_floats_scale_to_u16() {
        assert_eq!(
            unit_floats_to_u16(&[0.0, 0.5, 1.0, 4.0, -1.0, f32::NAN]),
            vec![0, 32768, 65535, 65535, 0, 0]
        );
    }
}
