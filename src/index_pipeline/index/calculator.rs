//! Normalized difference index over band pairs.
//!
//! For each eligible pixel the index is `(nir - red) / (nir + red)`. A pixel is
//! eligible when `red + nir` exceeds the low-signal threshold, which keeps near-black
//! and noise pixels (and the division by zero they would cause) out of the average.
//!
//! Pixels are processed in fixed-size chunks. Every chunk produces its own
//! [`IndexAccumulator`], and the partial results are merged in chunk order, so the
//! floating-point summation order, and therefore the result, does not depend on
//! whether the chunks ran on one thread or many.

use rayon::prelude::*;
use tracing::trace;

use crate::index_pipeline::bands::{BandPair, ChannelSelection};
use crate::index_pipeline::decode::types::{RasterBuffer, SampleBuffer};
use crate::index_pipeline::index::accumulator::IndexAccumulator;

/// Minimum `red + nir` (on the sample's native scale) for a pixel to count.
pub const LOW_SIGNAL_THRESHOLD: f64 = 10.0;

const PIXELS_PER_CHUNK: usize = 16 * 1024;

/// Index of one band pair, or `None` when the pixel is not eligible.
pub fn normalized_difference<T: Into<f64>>(pair: BandPair<T>, threshold: f64) -> Option<f64> {
    let red: f64 = pair.red.into();
    let nir: f64 = pair.nir_proxy.into();
    let total = red + nir;

    if total.is_finite() && total > threshold && total != 0.0 {
        Some((nir - red) / total)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IndexCalculator {
    threshold: f64,
    parallel: bool,
}

impl Default for IndexCalculator {
    fn default() -> Self {
        Self::new(LOW_SIGNAL_THRESHOLD, true)
    }
}

impl IndexCalculator {
    pub fn new(threshold: f64, parallel: bool) -> Self {
        Self { threshold, parallel }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn accumulate(&self, raster: &RasterBuffer, selection: ChannelSelection) -> IndexAccumulator {
        match raster.samples() {
            SampleBuffer::U8(samples) => self.accumulate_samples(samples, selection),
            SampleBuffer::U16(samples) => self.accumulate_samples(samples, selection),
            SampleBuffer::F32(samples) => self.accumulate_samples(samples, selection),
        }
    }

    pub fn accumulate_samples<T>(&self, samples: &[T], selection: ChannelSelection) -> IndexAccumulator
    where
        T: Copy + Into<f64> + Sync,
    {
        let chunk_len = PIXELS_PER_CHUNK * selection.stride();
        let accumulate_chunk = |chunk: &[T]| self.accumulate_pairs(selection.pairs(chunk));

        let partials: Vec<IndexAccumulator> = if self.parallel {
            samples.par_chunks(chunk_len).map(accumulate_chunk).collect()
        } else {
            samples.chunks(chunk_len).map(accumulate_chunk).collect()
        };

        trace!("Merging {} chunk accumulators", partials.len());
        partials
            .into_iter()
            .fold(IndexAccumulator::new(), IndexAccumulator::merge)
    }

    /// Folds an arbitrary sequence of band pairs into one accumulator.
    pub fn accumulate_pairs<T, I>(&self, pairs: I) -> IndexAccumulator
    where
        T: Into<f64>,
        I: IntoIterator<Item = BandPair<T>>,
    {
        let mut accumulator = IndexAccumulator::new();
        for pair in pairs {
            if let Some(index) = normalized_difference(pair, self.threshold) {
                accumulator.add(index);
            }
        }
        accumulator
    }
}
