use std::path::Path;

use tracing::{info, instrument, warn};

use crate::index_pipeline::{
    aggregate::Aggregator,
    analysis::types::{AnalysisConfig, IndexResult},
    bands::{BandExtractor, BandMapping, ChannelBandMapping},
    classify::classify,
    common::{DecodeError, PipelineError, PipelineTimings, Result},
    decode::{AutoDecoder, RasterBuffer, RasterDecoder},
    index::IndexCalculator,
};

pub struct NdviPipeline<D: RasterDecoder, M: BandMapping> {
    decoder: D,
    extractor: BandExtractor<M>,
    config: AnalysisConfig,
}

impl NdviPipeline<AutoDecoder, ChannelBandMapping> {
    /// Pipeline with format auto-detection and the default red=0, nir=1 mapping.
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_mapping(ChannelBandMapping::default(), config)
    }
}

impl<M: BandMapping> NdviPipeline<AutoDecoder, M> {
    pub fn with_mapping(mapping: M, config: AnalysisConfig) -> Self {
        Self::with_custom(AutoDecoder::new(), mapping, config)
    }
}

impl<D: RasterDecoder, M: BandMapping> NdviPipeline<D, M> {
    pub fn with_custom(decoder: D, mapping: M, config: AnalysisConfig) -> Self {
        Self {
            decoder,
            extractor: BandExtractor::new(mapping),
            config,
        }
    }

    fn validate_dimensions(&self, raster: &RasterBuffer) -> std::result::Result<(), DecodeError> {
        let (width, height) = (raster.width(), raster.height());

        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions(width, height));
        }

        if !self.config.validate_dimensions {
            return Ok(());
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(DecodeError::TooLarge { width, height, max });
            }
        }

        Ok(())
    }

    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn analyze(&self, input_data: &[u8]) -> Result<IndexResult> {
        let mut timings = PipelineTimings::new();
        self.run(input_data, &mut timings)
    }

    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn analyze_with_timings(&self, input_data: &[u8]) -> Result<(IndexResult, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let result = self.run(input_data, &mut timings)?;
        Ok((result, timings))
    }

    /// Runs every stage after decoding on an already decoded raster.
    #[instrument(skip(self, raster), fields(width = raster.width(), height = raster.height()))]
    pub fn analyze_raster(&self, raster: &RasterBuffer) -> Result<IndexResult> {
        let mut timings = PipelineTimings::new();
        self.run_raster(raster, &mut timings)
    }

    #[instrument(skip(self, input_path))]
    pub fn analyze_file<P: AsRef<Path>>(&self, input_path: P) -> Result<IndexResult> {
        let input_path = input_path.as_ref();
        info!(input = %input_path.display(), "Analyzing file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputRead(format!("{}: {}", input_path.display(), e))
            })?
        };

        self.analyze(&input_data)
    }

    fn run(&self, input_data: &[u8], timings: &mut PipelineTimings) -> Result<IndexResult> {
        info!("Starting vegetation index analysis");

        let raster = {
            let _span = tracing::info_span!("decode_raster").entered();
            timings.time("decode_raster", || self.decoder.decode(input_data))?
        };

        self.run_raster(&raster, timings)
    }

    fn run_raster(&self, raster: &RasterBuffer, timings: &mut PipelineTimings) -> Result<IndexResult> {
        {
            let _span = tracing::info_span!("validate_dimensions",
                width = raster.width(),
                height = raster.height()
            ).entered();
            timings.time("validate_dimensions", || self.validate_dimensions(raster))?;
        }

        let selection = {
            let _span = tracing::info_span!("extract_bands", channels = raster.channels()).entered();
            timings.time("extract_bands", || self.extractor.select(raster))?
        };

        let accumulator = {
            let _span = tracing::info_span!("accumulate_index").entered();
            let calculator = IndexCalculator::new(self.config.low_signal_threshold, self.config.parallel);
            timings.time("accumulate_index", || calculator.accumulate(raster, selection))
        };

        let aggregate = timings.time("aggregate", || {
            Aggregator::new(self.config.calibration_bias).reduce(&accumulator)
        });

        let classification = timings.time("classify", || {
            classify(self.config.classification_basis.select(&aggregate))
        });

        let result = IndexResult::new(aggregate, classification);

        info!(
            width = raster.width(),
            height = raster.height(),
            channels = raster.channels(),
            sample_count = result.sample_count(),
            raw_average = result.raw_average(),
            average_index = %result.formatted_average(),
            classification = %result.classification(),
            "Analysis complete"
        );
        Ok(result)
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
    }

    pub fn mapping(&self) -> &M {
        self.extractor.mapping()
    }
}
