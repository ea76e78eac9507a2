//! Benchmarks for the LFO and the routed oscillator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::dsp::{lfo::Lfo, oscillator::Oscillator, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut lfo = Lfo::with_waveform(SAMPLE_RATE, Waveform::Triangle, 3.0);
        group.bench_with_input(BenchmarkId::new("lfo", size), &size, |b, _| {
            b.iter(|| lfo.render(black_box(&mut buffer)))
        });

        // Below the BLIT threshold
        let frequencies = vec![12.0f32; size];
        let mut osc = Oscillator::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("sub_audio", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&frequencies), black_box(&mut buffer)))
        });

        let frequencies = vec![440.0f32; size];
        let mut osc = Oscillator::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("audio", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&frequencies), black_box(&mut buffer)))
        });
    }

    group.finish();
}
