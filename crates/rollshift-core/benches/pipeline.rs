//! Benchmarks for rollshift-core pipeline operations
//!
//! Run with: cargo bench -p rollshift-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rollshift_core::auto_adjust::{enhance_contrast, gray_world_white_balance, retinex_normalize};
use rollshift_core::filters::{denoise, sharpen};
use rollshift_core::models::{ClaheParams, PipelineConfig};
use rollshift_core::pipeline::{estimate_base_default, process_auto};
use rollshift_core::RgbImage;

/// Generate a synthetic orange-masked negative
fn generate_test_negative(width: u32, height: u32) -> RgbImage {
    let pixel_count = (width * height) as usize;
    let mut data = Vec::with_capacity(pixel_count * 3);

    for i in 0..pixel_count {
        let x = (i % width as usize) as f32 / width as f32;
        let y = (i / width as usize) as f32 / height as f32;

        // Mask-like base scaled down by scene density
        data.push(215.0 * (0.3 + 0.6 * x));
        data.push(150.0 * (0.3 + 0.6 * y));
        data.push(95.0 * (0.3 + 0.3 * (x + y)));
    }

    RgbImage::new(width, height, data).expect("valid synthetic image")
}

const SIZES: [u32; 3] = [256, 512, 1024];

/// Benchmark the cheap per-pixel and statistics stages
fn bench_color_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("color_stages");

    for &size in SIZES.iter() {
        let image = generate_test_negative(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));
        let label = format!("{}x{}", size, size);

        group.bench_with_input(BenchmarkId::new("estimate_base", &label), &image, |b, img| {
            b.iter(|| estimate_base_default(black_box(img)))
        });
        group.bench_with_input(BenchmarkId::new("gray_world", &label), &image, |b, img| {
            b.iter(|| gray_world_white_balance(black_box(img)))
        });
        group.bench_with_input(BenchmarkId::new("retinex", &label), &image, |b, img| {
            b.iter(|| retinex_normalize(black_box(img)))
        });
    }

    group.finish();
}

/// Benchmark CLAHE and the neighbourhood filters, the most expensive stages
fn bench_local_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_stages");
    group.sample_size(20);
    let params = ClaheParams::default();

    for &size in SIZES.iter() {
        let image = generate_test_negative(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));
        let label = format!("{}x{}", size, size);

        group.bench_with_input(BenchmarkId::new("clahe", &label), &image, |b, img| {
            b.iter(|| enhance_contrast(black_box(img), black_box(&params)))
        });
        group.bench_with_input(BenchmarkId::new("sharpen", &label), &image, |b, img| {
            b.iter(|| sharpen(black_box(img), 1.0))
        });
        group.bench_with_input(BenchmarkId::new("denoise", &label), &image, |b, img| {
            b.iter(|| denoise(black_box(img), 5.0))
        });
    }

    group.finish();
}

/// Benchmark the full AUTO path
fn bench_pipeline_workflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_workflow");
    group.sample_size(10);
    let config = PipelineConfig::default();

    for &size in SIZES.iter() {
        let image = generate_test_negative(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(
            BenchmarkId::new("process_auto", format!("{}x{}", size, size)),
            &image,
            |b, img| b.iter(|| process_auto(black_box(img), black_box(&config))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_color_stages,
    bench_local_stages,
    bench_pipeline_workflow
);
criterion_main!(benches);
