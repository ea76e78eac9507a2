//! Benchmarks for the band-limited impulse train oscillator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::dsp::{blit::BlitOscillator, blit::BlitTable, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_blit(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/blit");

    group.bench_function("table_generate", |b| b.iter(|| black_box(BlitTable::generate())));

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, waveform) in [
            ("triangle", Waveform::Triangle),
            ("sawtooth", Waveform::Sawtooth),
            ("square", Waveform::Square),
        ] {
            let mut osc = BlitOscillator::new(SAMPLE_RATE);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = osc.next_sample(black_box(440.0), waveform);
                    }
                    black_box(&buffer);
                })
            });
        }

        // Frequency recomputed every sample, as under vibrato
        let mut osc = BlitOscillator::new(SAMPLE_RATE);
        let mut phase = 0.0f32;
        group.bench_with_input(BenchmarkId::new("sawtooth_fm", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    phase = (phase + 0.0001).fract();
                    let freq = 440.0 * (1.0 + 0.2 * (phase - 0.5));
                    *sample = osc.next_sample(freq, Waveform::Sawtooth);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
