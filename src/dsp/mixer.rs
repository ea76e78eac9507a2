//! Two-channel gain/mute mixer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Mixing two oscillators is plain weighted addition:

    out = osc1 * gain1 + osc2 * gain2

Each gain comes from a panel knob (raw 12-bit reading scaled to 0..1). A
muted channel has an effective gain of exactly zero, whatever its knob says,
and keeps its knob value for when it is unmuted. The sum is not normalised;
two full-scale oscillators at full gain can reach ±2.0 and rely on the
master gain downstream.
*/

/// Gain per raw control unit (~1/4096).
pub const GAIN_PER_UNIT: f32 = 0.000_244;
/// Power-on gain for both channels.
pub const DEFAULT_GAIN: f32 = 0.3;

/// Mixer input.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixerChannel {
    Osc1,
    Osc2,
}

impl MixerChannel {
    #[inline]
    fn index(self) -> usize {
        match self {
            MixerChannel::Osc1 => 0,
            MixerChannel::Osc2 => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Strip {
    gain: f32,
    muted: bool,
}

impl Strip {
    #[inline]
    fn effective_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.gain
        }
    }
}

pub struct Mixer {
    strips: [Strip; 2],
}

impl Mixer {
    /// Oscillator 1 open, oscillator 2 muted.
    pub fn new() -> Self {
        Self {
            strips: [
                Strip {
                    gain: DEFAULT_GAIN,
                    muted: false,
                },
                Strip {
                    gain: DEFAULT_GAIN,
                    muted: true,
                },
            ],
        }
    }

    /// Set a channel's gain from a raw control reading.
    pub fn set_gain(&mut self, channel: MixerChannel, reading: u16) {
        self.strips[channel.index()].gain = gain_from_reading(reading);
    }

    pub fn set_mute(&mut self, channel: MixerChannel, muted: bool) {
        self.strips[channel.index()].muted = muted;
    }

    /// Gain actually applied: zero while muted.
    pub fn gain(&self, channel: MixerChannel) -> f32 {
        self.strips[channel.index()].effective_gain()
    }

    pub fn is_muted(&self, channel: MixerChannel) -> bool {
        self.strips[channel.index()].muted
    }

    /// Mix one sample from each oscillator.
    #[inline]
    pub fn mix(&self, osc1: f32, osc2: f32) -> f32 {
        osc1 * self.strips[0].effective_gain() + osc2 * self.strips[1].effective_gain()
    }

    /// Scale both oscillator buffers in place and sum them into `out`.
    pub fn render(&self, osc1: &mut [f32], osc2: &mut [f32], out: &mut [f32]) {
        debug_assert_eq!(osc1.len(), out.len());
        debug_assert_eq!(osc2.len(), out.len());

        let g1 = self.strips[0].effective_gain();
        let g2 = self.strips[1].effective_gain();

        for ((a, b), o) in osc1.iter_mut().zip(osc2.iter_mut()).zip(out.iter_mut()) {
            *a *= g1;
            *b *= g2;
            *o = *a + *b;
        }
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn gain_from_reading(reading: u16) -> f32 {
    (reading as f32 * GAIN_PER_UNIT).min(1.0)
}
