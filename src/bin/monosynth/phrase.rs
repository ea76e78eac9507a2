//! Scripted demo: a short riff with panel moves in between, sent the way the
//! hardware would send it (USB-MIDI packets and panel scans).

use saavy_mono::synth::{AnalogReadings, AnalogSlot};

pub enum Step {
    /// Raw USB-MIDI receive buffer.
    Midi(Vec<u8>),
    Analog(AnalogReadings),
    Pin(u16, bool),
    Rest(f32),
}

const CABLE_NOTE_OFF: u8 = 0x08;
const CABLE_NOTE_ON: u8 = 0x09;
const CABLE_CONTROL: u8 = 0x0B;
const CABLE_BEND: u8 = 0x0E;

fn note_on(key: u8) -> Step {
    Step::Midi(vec![CABLE_NOTE_ON, 0x90, key, 100])
}

fn note_off(key: u8) -> Step {
    Step::Midi(vec![CABLE_NOTE_OFF, 0x80, key, 0])
}

fn play(key: u8, beats: f32) -> [Step; 3] {
    [note_on(key), Step::Rest(beats * 0.9), note_off(key)]
}

/// Knob positions for a bright, slightly detuned two-oscillator patch.
fn patch() -> AnalogReadings {
    AnalogReadings::default()
        .with(AnalogSlot::Osc1Octave, 2400)
        .with(AnalogSlot::Osc2Octave, 2400)
        .with(AnalogSlot::Detune, 1660)
        .with(AnalogSlot::Osc1Gain, 2400)
        .with(AnalogSlot::Osc2Gain, 2000)
        .with(AnalogSlot::LfoRate, 100)
        .with(AnalogSlot::Cutoff, 600)
        .with(AnalogSlot::Resonance, 1800)
        .with(AnalogSlot::Attack, 40)
        .with(AnalogSlot::Release, 600)
}

pub fn demo() -> Vec<Step> {
    let mut steps = vec![
        Step::Analog(patch()),
        // Unmute oscillator 2, square on oscillator 1
        Step::Pin(1 << 7, false),
        Step::Pin(1 << 2, true),
    ];

    for key in [45, 52, 57, 60] {
        steps.extend(play(key, 0.5));
        steps.push(Step::Rest(0.05));
    }

    // Mod wheel into vibrato and filter sweep
    steps.push(Step::Pin(1 << 10, true));
    steps.push(Step::Pin(1 << 11, true));
    steps.push(Step::Midi(vec![CABLE_CONTROL, 0xB0, 1, 90]));
    steps.extend(play(57, 2.0));

    // Bend up about a whole tone while holding
    steps.push(note_on(64));
    steps.push(Step::Rest(0.5));
    steps.push(Step::Midi(vec![CABLE_BEND, 0xE0, 0x00, 0x48]));
    steps.push(Step::Rest(1.0));
    steps.push(Step::Midi(vec![CABLE_BEND, 0xE0, 0x00, 0x40]));
    steps.push(note_off(64));

    steps
}
