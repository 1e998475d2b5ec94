use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use ndvi_estimator::index_pipeline::{
    AnalysisConfig, ChannelBandMapping, ClassificationBasis, DEFAULT_CALIBRATION_BIAS,
    LOW_SIGNAL_THRESHOLD, NdviPipeline,
};
use ndvi_estimator::logger;

/// Estimate vegetation density from an image
#[derive(Parser)]
#[command(name = "ndvi_estimator", version, long_about = None)]
struct Cli {
    /// Input image (PNG, JPEG, TIFF, camera RAW, ...)
    input: PathBuf,

    /// Channel read as the red band
    #[arg(long, default_value_t = 0)]
    red_channel: usize,

    /// Channel read as the near-infrared band
    #[arg(long, default_value_t = 1)]
    nir_channel: usize,

    /// Minimum red + nir for a pixel to be counted
    #[arg(long, default_value_t = LOW_SIGNAL_THRESHOLD)]
    threshold: f64,

    /// Offset added to the average before reporting
    #[arg(long, default_value_t = DEFAULT_CALIBRATION_BIAS, allow_hyphen_values = true)]
    bias: f64,

    /// Classify the raw average instead of the reported one
    #[arg(long)]
    classify_raw: bool,

    /// Accumulate pixels on the current thread only
    #[arg(long)]
    sequential: bool,

    /// Log per-stage timings
    #[arg(long)]
    timings: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    info!("Starting ndvi_estimator...");

    let config = AnalysisConfig::builder()
        .low_signal_threshold(cli.threshold)
        .calibration_bias(cli.bias)
        .classification_basis(if cli.classify_raw {
            ClassificationBasis::Raw
        } else {
            ClassificationBasis::Calibrated
        })
        .parallel(!cli.sequential)
        .build();
    let pipeline = NdviPipeline::with_mapping(
        ChannelBandMapping::new(cli.red_channel, cli.nir_channel),
        config,
    );

    info!("Band mapping: red=ch{}, nir=ch{}", cli.red_channel, cli.nir_channel);
    info!("Calibration bias: {}", pipeline.config().calibration_bias);

    let input = std::fs::read(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let outcome = if cli.timings {
        pipeline.analyze_with_timings(&input).map(|(result, timings)| {
            info!("\n{}", timings.summary());
            result
        })
    } else {
        pipeline.analyze(&input)
    };

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            error!(stage = %e.stage(), "Analysis failed: {}", e);
            return Err(e.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result.report())?);
    } else {
        println!("Average index:  {}", result.formatted_average());
        println!("Samples:        {}", result.sample_count());
        println!("Classification: {}", result.classification());
    }

    Ok(())
}
