//! Benchmarks for the AR envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::dsp::envelope::Envelope;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![1.0f32; size];

        // Attack phase (ramping up)
        let mut env = Envelope::ar(SAMPLE_RATE, 10.0, 10.0);
        env.note_on();
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| env.apply(black_box(&mut buffer)))
        });

        // Sustain phase (holding steady)
        let mut env = Envelope::ar(SAMPLE_RATE, 0.001, 0.3);
        env.note_on();
        for _ in 0..200 {
            env.next_level();
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| env.apply(black_box(&mut buffer)))
        });

        // Release phase (ramping down)
        let mut env = Envelope::ar(SAMPLE_RATE, 0.001, 10.0);
        env.note_on();
        for _ in 0..200 {
            env.next_level();
        }
        env.note_off();
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| env.apply(black_box(&mut buffer)))
        });
    }

    group.finish();
}
