//! Benchmarks for the inkpic conversion stages.
//!
//! Run with: cargo bench -p inkpic-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use inkpic_core::config::{EnhanceConfig, QuantizeConfig};
use inkpic_core::pipeline::{encode_bmp, enhance, geometry, Quantizer};
use inkpic_core::FrameGeometry;
use std::path::Path;

fn photo_like(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x ^ y) & 0xFF) as u8,
        ])
    })
}

fn benchmark_enhance(c: &mut Criterion) {
    let img = photo_like(2048, 1536);
    let config = EnhanceConfig::default();

    c.bench_function("enhance_2048x1536", |b| {
        b.iter(|| enhance::enhance(black_box(&img), &config))
    });
}

fn benchmark_crop_and_resize(c: &mut Criterion) {
    let img = photo_like(2048, 1536);

    c.bench_function("crop_resize_2048x1536", |b| {
        b.iter(|| {
            let cropped = geometry::crop_to_ratio(black_box(&img), FrameGeometry::FRAME);
            geometry::resize_to_frame(&cropped, FrameGeometry::FRAME)
        })
    });
}

fn benchmark_quantize(c: &mut Criterion) {
    let img = photo_like(800, 480);
    let with_kmeans = Quantizer::new(QuantizeConfig::default());
    let dither_only = Quantizer::new(QuantizeConfig {
        kmeans_clusters: 0,
        ..QuantizeConfig::default()
    });

    c.bench_function("quantize_kmeans_dither", |b| {
        b.iter(|| with_kmeans.quantize(black_box(&img)))
    });
    c.bench_function("quantize_dither_only", |b| {
        b.iter(|| dither_only.quantize(black_box(&img)))
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let frame = Quantizer::new(QuantizeConfig::default()).quantize(&photo_like(800, 480));

    c.bench_function("encode_bmp", |b| {
        b.iter(|| encode_bmp(black_box(&frame), Path::new("pic_000.bmp")))
    });
}

criterion_group!(
    benches,
    benchmark_enhance,
    benchmark_crop_and_resize,
    benchmark_quantize,
    benchmark_encode,
);
criterion_main!(benches);
