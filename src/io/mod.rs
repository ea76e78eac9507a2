// Purpose - collaborator boundary: MIDI decoding in, i16 stereo blocks out

pub mod converter;
pub mod midi;

use crate::BUFFER_SIZE;

/// Channels per output frame. Left and right carry the same mono signal.
pub const CHANNELS: usize = 2;

/// One block of interleaved stereo samples for the DAC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioOutput {
    pub samples: [i16; BUFFER_SIZE * CHANNELS],
}

impl AudioOutput {
    pub fn new() -> Self {
        Self {
            samples: [0; BUFFER_SIZE * CHANNELS],
        }
    }

    /// Write a mono sample to both channels of frame `index`.
    #[inline]
    pub fn set_frame(&mut self, index: usize, sample: i16) {
        self.samples[index * CHANNELS] = sample;
        self.samples[index * CHANNELS + 1] = sample;
    }

    /// `[left, right]` pairs.
    pub fn frames(&self) -> impl Iterator<Item = &[i16]> {
        self.samples.chunks_exact(CHANNELS)
    }

    /// Left channel only.
    pub fn left(&self) -> impl Iterator<Item = i16> + '_ {
        self.samples.iter().step_by(CHANNELS).copied()
    }
}

impl Default for AudioOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale a nominal ±1.0 sample to i16, truncating toward zero.
/// Out-of-range values saturate (`as` casts from float clamp).
#[inline]
pub fn quantize(sample: f32) -> i16 {
    (sample * 32_767.0) as i16
}
