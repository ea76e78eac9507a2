#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{blit::BlitOscillator, lfo::Lfo};

/// Frequencies at or below this use the naive LFO path. The BLIT edge
/// counter needs periods short enough to be meaningful against its 256-slot
/// ring and 16-tap kernels.
pub const BLIT_THRESHOLD_HZ: f32 = 20.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    Triangle,
    #[default]
    Sawtooth,
    Square,
}

/// Audio oscillator: band-limited above 20 Hz, plain phase accumulator below.
///
/// Frequency and waveform are forwarded to both generators so switching
/// paths mid-note keeps the same shape.
pub struct Oscillator {
    blit: BlitOscillator,
    lfo: Lfo,
    frequency: f32,
    waveform: Waveform,
}

impl Oscillator {
    pub fn new(sample_rate: f32) -> Self {
        let waveform = Waveform::default();
        Self {
            blit: BlitOscillator::new(sample_rate),
            lfo: Lfo::with_waveform(sample_rate, waveform, 0.0),
            frequency: 0.0,
            waveform,
        }
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
        self.lfo.set_waveform(waveform);
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
        self.lfo.set_frequency(frequency);
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.frequency <= BLIT_THRESHOLD_HZ {
            self.lfo.next_sample()
        } else {
            self.blit.next_sample(self.frequency, self.waveform)
        }
    }

    /// Render a block, setting the frequency per sample from `frequencies`.
    pub fn render(&mut self, frequencies: &[f32], out: &mut [f32]) {
        debug_assert_eq!(frequencies.len(), out.len());

        for (&frequency, sample) in frequencies.iter().zip(out.iter_mut()) {
            self.set_frequency(frequency);
            *sample = self.next_sample();
        }
    }

    pub fn clear_accumulators(&mut self) {
        self.blit.clear_accumulators();
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn blit(&self) -> &BlitOscillator {
        &self.blit
    }
}
