//! Benchmarks for the ladder low-pass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::dsp::filter::LadderFilter;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| if i % 64 < 32 { 0.8 } else { -0.8 }).collect();
        let mut buffer = input.clone();

        // Fixed cutoff
        let mut filter = LadderFilter::new(SAMPLE_RATE);
        filter.set_resonance(1.0);
        let cutoffs = vec![2_000.0f32; size];
        group.bench_with_input(BenchmarkId::new("static", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&cutoffs), black_box(&mut buffer));
            })
        });

        // Cutoff moving every sample
        let mut filter = LadderFilter::new(SAMPLE_RATE);
        filter.set_resonance(1.8);
        let cutoffs: Vec<f32> = (0..size).map(|i| 200.0 + 40.0 * i as f32).collect();
        group.bench_with_input(BenchmarkId::new("swept", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&cutoffs), black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
