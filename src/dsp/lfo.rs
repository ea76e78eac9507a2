//! Low Frequency Oscillator (LFO).

use crate::dsp::oscillator::Waveform;

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running at sub-audio frequencies. Here it plays two
roles: the synthesizer's shared modulation source (vibrato, tremolo, filter
sweep), and the sound source for oscillators tuned at or below 20 Hz, where
the BLIT edge logic stops making sense.

Vocabulary
----------

  phase       Position within the current cycle, 0.0 ≤ phase < 1.0.

  increment   Phase advance per sample = frequency / sample_rate.
              Recomputed every sample so the frequency can be modulated
              without a discontinuity.

  bipolar     Output swings -1.0 to +1.0. All three shapes are bipolar.


Waveform Formulas
-----------------

    TRIANGLE   4 * |phase - 0.5| - 1       starts at +1, dips to -1 mid-cycle
    SAWTOOTH   2 * phase - 1               rises -1 → +1, snaps back
    SQUARE     sign(phase - 0.5)           -1 first half, +1 second half,
                                           exactly 0 at phase = 0.5

These are NOT band-limited. At LFO rates the harmonics that would alias sit
far above anything audible; at audio rates use the BLIT oscillator instead.


Phase Wrapping
--------------

    phase += increment
    phase -= trunc(phase)

Subtracting the integer part keeps phase in [0, 1) even when the increment
exceeds one cycle per sample.
*/

/// Default modulation rate in Hz.
pub const DEFAULT_RATE: f32 = 3.0;

pub struct Lfo {
    sample_rate: f32,
    frequency: f32,
    waveform: Waveform,
    phase: f32,
    increment: f32,
}

impl Lfo {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            frequency: DEFAULT_RATE,
            waveform: Waveform::Triangle,
            phase: 0.0,
            increment: DEFAULT_RATE / sample_rate,
        }
    }

    pub fn with_waveform(sample_rate: f32, waveform: Waveform, frequency: f32) -> Self {
        let mut lfo = Self::new(sample_rate);
        lfo.waveform = waveform;
        lfo.frequency = frequency;
        lfo
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Output at the current phase, then advance.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let value = match self.waveform {
            Waveform::Triangle => 4.0 * (self.phase - 0.5).abs() - 1.0,
            Waveform::Sawtooth => 2.0 * self.phase - 1.0,
            Waveform::Square => {
                (self.phase > 0.5) as i32 as f32 - (self.phase < 0.5) as i32 as f32
            }
        };

        self.increment = self.frequency / self.sample_rate;
        self.phase += self.increment;
        self.phase -= self.phase.trunc();

        value
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}
