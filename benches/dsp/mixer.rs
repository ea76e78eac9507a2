//! Benchmarks for the two-channel mixer.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::dsp::mixer::{Mixer, MixerChannel};

use crate::BLOCK_SIZES;

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mixer");

    let mut mixer = Mixer::new();
    mixer.set_mute(MixerChannel::Osc2, false);
    mixer.set_gain(MixerChannel::Osc1, 3000);
    mixer.set_gain(MixerChannel::Osc2, 2000);

    for &size in BLOCK_SIZES {
        let mut a = vec![0.5f32; size];
        let mut b = vec![-0.25f32; size];
        let mut out = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("render", size), &size, |bench, _| {
            bench.iter(|| {
                a.fill(0.5);
                b.fill(-0.25);
                mixer.render(black_box(&mut a), black_box(&mut b), black_box(&mut out));
            })
        });
    }

    group.finish();
}
