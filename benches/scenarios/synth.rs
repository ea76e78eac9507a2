//! Full synthesizer blocks: both oscillators, filter, envelope and modulation.

use std::hint::black_box;

use criterion::Criterion;
use saavy_mono::{
    dsp::Waveform,
    io::AudioOutput,
    synth::{synthesizer::cc, AnalogReadings, AnalogSlot, PanelInput, Synthesizer},
};

use crate::SAMPLE_RATE;

fn patch() -> AnalogReadings {
    AnalogReadings::default()
        .with(AnalogSlot::Osc1Octave, 2400)
        .with(AnalogSlot::Osc2Octave, 3000)
        .with(AnalogSlot::Detune, 1700)
        .with(AnalogSlot::Osc1Gain, 3000)
        .with(AnalogSlot::Osc2Gain, 2500)
        .with(AnalogSlot::LfoRate, 40)
        .with(AnalogSlot::Cutoff, 500)
        .with(AnalogSlot::Resonance, 3000)
        .with(AnalogSlot::Attack, 100)
        .with(AnalogSlot::Release, 800)
}

pub fn bench_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/synth");
    let mut out = AudioOutput::new();

    // Power-on patch, one held note
    let mut synth = Synthesizer::new(SAMPLE_RATE);
    synth.note_on(220.0, 1.0);
    group.bench_function("default_block", |b| {
        b.iter(|| synth.render_block(black_box(&mut out)))
    });

    // Both oscillators, vibrato, filter sweep and tremolo
    let mut synth = Synthesizer::new(SAMPLE_RATE);
    synth.parameters_changed_analog(&patch());
    for input in [
        PanelInput::Osc2Mute(false),
        PanelInput::Osc2Waveform(Waveform::Square),
        PanelInput::Vibrato(true),
        PanelInput::FilterModulation(true),
        PanelInput::Tremolo(true),
    ] {
        synth.parameters_changed_digital(input);
    }
    synth.controller_change(cc::MOD_WHEEL, 0.6);
    synth.note_on(110.0, 1.0);
    group.bench_function("modulated_block", |b| {
        b.iter(|| synth.render_block(black_box(&mut out)))
    });

    // Idle voice: no note, everything still runs
    let mut synth = Synthesizer::new(SAMPLE_RATE);
    group.bench_function("idle_block", |b| {
        b.iter(|| synth.render_block(black_box(&mut out)))
    });

    group.finish();
}
