use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use image::{ImageFormat, Rgb, RgbImage};
use ndvi_estimator::index_pipeline::{
    AnalysisConfig, NdviPipeline, RasterBuffer, SampleBuffer,
};
use std::io::Cursor;

fn generate_mock_raster(width: usize, height: usize) -> RasterBuffer {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.push(((x + y) % 256) as u8);
            data.push(((x * 3 + y) % 256) as u8);
            data.push((y % 256) as u8);
        }
    }
    RasterBuffer::new(width, height, 3, SampleBuffer::U8(data)).unwrap()
}

fn generate_mock_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([((x + y) % 256) as u8, ((x * 3 + y) % 256) as u8, (y % 256) as u8])
    });
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

fn benchmark_raster_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis_by_size");

    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (1000, 1000, "1000x1000"),
    ];

    for (width, height, label) in sizes {
        let raster = generate_mock_raster(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &raster,
            |b, raster| {
                let pipeline = NdviPipeline::new(AnalysisConfig::default());
                b.iter(|| {
                    let _ = pipeline.analyze_raster(black_box(raster));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_parallel_accumulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_accumulation");
    let raster = generate_mock_raster(2000, 2000);

    for (parallel, label) in [(true, "parallel"), (false, "sequential")] {
        group.bench_function(label, |b| {
            let config = AnalysisConfig::builder().parallel(parallel).build();
            let pipeline = NdviPipeline::new(config);

            b.iter(|| {
                let _ = pipeline.analyze_raster(black_box(&raster));
            });
        });
    }

    group.finish();
}

fn benchmark_decode_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_overhead");
    let png = generate_mock_png(500, 500);
    let raster = generate_mock_raster(500, 500);
    let pipeline = NdviPipeline::new(AnalysisConfig::default());

    group.bench_function("png_bytes", |b| {
        b.iter(|| {
            let _ = pipeline.analyze(black_box(&png));
        });
    });

    group.bench_function("decoded_raster", |b| {
        b.iter(|| {
            let _ = pipeline.analyze_raster(black_box(&raster));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_raster_sizes,
    benchmark_parallel_accumulation,
    benchmark_decode_overhead
);
criterion_main!(benches);
