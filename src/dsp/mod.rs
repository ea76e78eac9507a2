//! Low-level DSP primitives used by the synthesizer.
//!
//! These components are allocation-free and realtime-safe: every buffer is a
//! fixed-size array owned by its component, and every per-sample call does a
//! bounded amount of arithmetic. The synthesizer owns them in a strict tree
//! and drives them one sample at a time.

/// Band-limited impulse train oscillator (alias-suppressed audio-rate waves).
pub mod blit;
/// Attack/sustain/release envelope with voice-reset signalling.
pub mod envelope;
/// Four-stage resonant ladder low-pass.
pub mod filter;
/// Naive phase-accumulator oscillator for modulation and sub-audio tones.
pub mod lfo;
/// Two-channel gain/mute mixer.
pub mod mixer;
/// Router between the BLIT and LFO generators.
pub mod oscillator;

pub use envelope::EnvelopeState;
pub use oscillator::Waveform;
