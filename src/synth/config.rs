#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SAMPLE_RATE;

/// Construction-time settings. Everything else starts from `synth::defaults`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    pub sample_rate: f32,
    /// Slots in the control → audio message queue.
    pub control_queue_capacity: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            control_queue_capacity: 64,
        }
    }
}
