//! Compiled-in power-on values. Nothing is persisted; every start uses these.

use crate::dsp::Waveform;

pub const NOTE_FREQUENCY: f32 = 220.0;
pub const VELOCITY: f32 = 1.0;
/// Centre position, no bend.
pub const PITCH_BEND: f32 = 0.5;
pub const MOD_WHEEL: f32 = 0.0;

pub const OCTAVE: f32 = 1.0;
/// Unison; the panel maps detune onto 0.67..1.5.
pub const DETUNE: f32 = 1.0;
pub const OSC_WAVEFORM: Waveform = Waveform::Sawtooth;

pub const LFO_WAVEFORM: Waveform = Waveform::Triangle;
pub const LFO_RATE: f32 = 3.0;

pub const FILTER_CUTOFF: f32 = 10_000.0;
pub const FILTER_RESONANCE: f32 = 0.2;

pub const MASTER_GAIN: f32 = 0.3;
pub const GAIN_ENABLED: bool = true;
pub const TREMOLO: bool = false;
pub const VIBRATO: bool = false;
pub const FILTER_MODULATION: bool = false;
