//! Benchmarks for the reference stages and the full demo chain.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fxchain_core::SampleBuffer;
use fxchain_effects::{
    BufferStage, DelayParams, DistortionParams, LowpassParams, Pipeline, Stage, StageList,
};

const SAMPLE_RATE: u32 = 44100;
const BUFFER_SIZES: [usize; 3] = [4410, 44100, 441_000];

fn test_buffer(len: usize) -> SampleBuffer {
    let samples = (0..len)
        .map(|n| (core::f32::consts::TAU * 440.0 * n as f32 / SAMPLE_RATE as f32).sin())
        .collect();
    SampleBuffer::new(samples, SAMPLE_RATE).unwrap()
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stage");

    let stages: [(&str, Stage); 3] = [
        ("distortion", DistortionParams::default().into()),
        ("delay", DelayParams::default().into()),
        ("lowpass", LowpassParams::default().into()),
    ];

    for size in BUFFER_SIZES {
        let buffer = test_buffer(size);
        group.throughput(Throughput::Elements(size as u64));
        for (name, stage) in &stages {
            group.bench_with_input(BenchmarkId::new(*name, size), &buffer, |b, buffer| {
                b.iter(|| stage.apply(black_box(buffer.clone())).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_demo_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = Pipeline::new(
        StageList::new()
            .with(DistortionParams::default())
            .with(DelayParams::default())
            .with(LowpassParams::default()),
    );

    for size in BUFFER_SIZES {
        let buffer = test_buffer(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("demo_chain", size), &buffer, |b, buffer| {
            b.iter(|| pipeline.process(black_box(buffer.clone())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stages, bench_demo_chain);
criterion_main!(benches);
