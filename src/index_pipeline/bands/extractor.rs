use tracing::debug;

use crate::index_pipeline::bands::mapping::BandMapping;
use crate::index_pipeline::bands::types::BandPair;
use crate::index_pipeline::common::error::InsufficientChannelsError;
use crate::index_pipeline::decode::types::RasterBuffer;

/// Fewest channels a raster may have for band extraction, whatever the mapping.
pub const MIN_CHANNELS: usize = 2;

pub struct BandExtractor<M: BandMapping> {
    mapping: M,
}

impl<M: BandMapping> BandExtractor<M> {
    pub fn new(mapping: M) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &M {
        &self.mapping
    }

    /// Checks the raster against the mapping and resolves the channel offsets.
    pub fn select(&self, raster: &RasterBuffer) -> Result<ChannelSelection, InsufficientChannelsError> {
        let red = self.mapping.red_channel();
        let nir = self.mapping.nir_channel();
        let available = raster.channels();
        // A channel index of usize::MAX would need more channels than can be counted.
        let required = red
            .max(nir)
            .checked_add(1)
            .map_or(usize::MAX, |needed| needed.max(MIN_CHANNELS));

        if available < required || red >= available || nir >= available {
            return Err(InsufficientChannelsError { required, available });
        }

        debug!(
            "Band mapping {} over {} channels",
            self.mapping.describe(),
            raster.channels()
        );

        Ok(ChannelSelection {
            red,
            nir,
            stride: raster.channels(),
        })
    }
}

/// Validated channel offsets for one raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSelection {
    red: usize,
    nir: usize,
    stride: usize,
}

impl ChannelSelection {
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// `pixel` must hold at least `stride` samples.
    pub fn pair<T: Copy>(&self, pixel: &[T]) -> BandPair<T> {
        BandPair {
            red: pixel[self.red],
            nir_proxy: pixel[self.nir],
        }
    }

    /// Band pairs of every whole pixel in `samples`, row-major.
    pub fn pairs<T: Copy>(self, samples: &[T]) -> impl Iterator<Item = BandPair<T>> + '_ {
        samples
            .chunks_exact(self.stride)
            .map(move |pixel| self.pair(pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_pipeline::bands::mapping::ChannelBandMapping;
    use crate::index_pipeline::decode::types::SampleBuffer;

    fn raster(channels: usize, samples: Vec<u8>) -> RasterBuffer {
        let width = samples.len() / channels;
        RasterBuffer::new(width, 1, channels, SampleBuffer::U8(samples)).unwrap()
    }

    #[test]
    fn test_default_mapping_pairs() {
        let raster = raster(3, vec![10, 30, 99, 0, 0, 99]);
        let selection = BandExtractor::new(ChannelBandMapping::default())
            .select(&raster)
            .unwrap();

        let SampleBuffer::U8(samples) = raster.samples() else {
            unreachable!()
        };
        let pairs: Vec<_> = selection.pairs(samples).collect();
        assert_eq!(
            pairs,
            vec![
                BandPair { red: 10, nir_proxy: 30 },
                BandPair { red: 0, nir_proxy: 0 },
            ]
        );
    }

    #[test]
    fn test_custom_mapping_selects_named_channels() {
        // Five-band capture: blue, green, red, red-edge, nir.
        let raster = raster(5, vec![1, 2, 3, 4, 5]);
        let selection = BandExtractor::new(ChannelBandMapping::new(2, 4))
            .select(&raster)
            .unwrap();

        assert_eq!(selection.pair(&[1u8, 2, 3, 4, 5]), BandPair { red: 3, nir_proxy: 5 });
    }

    #[test]
    fn test_single_channel_rejected() {
        let raster = raster(1, vec![10, 20, 30]);
        let err = BandExtractor::new(ChannelBandMapping::default())
            .select(&raster)
            .unwrap_err();
        assert_eq!(err, InsufficientChannelsError { required: 2, available: 1 });
    }

    #[test]
    fn test_mapping_beyond_channel_count_rejected() {
        let raster = raster(3, vec![1, 2, 3]);
        let err = BandExtractor::new(ChannelBandMapping::new(0, 3))
            .select(&raster)
            .unwrap_err();
        assert_eq!(err, InsufficientChannelsError { required: 4, available: 3 });
    }

    #[test]
    fn test_unbounded_channel_index_rejected() {
        let raster = raster(2, vec![10, 30, 0, 0]);
        for mapping in [
            ChannelBandMapping::new(usize::MAX, 1),
            ChannelBandMapping::new(0, usize::MAX),
        ] {
            let err = BandExtractor::new(mapping).select(&raster).unwrap_err();
            assert_eq!(
                err,
                InsufficientChannelsError { required: usize::MAX, available: 2 }
            );
        }
    }
}
