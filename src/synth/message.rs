#[cfg(feature = "rtrb")]
use rtrb::Consumer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::synth::panel::{AnalogReadings, PanelInput};

/// A control-rate change, produced by the MIDI decoder or the panel scanner
/// and applied by the audio context at the next block boundary.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    NoteOn { frequency: f32, velocity: f32 },
    NoteOff { frequency: f32, velocity: f32 },
    ControllerChange { controller: u8, value: f32 },
    /// 0.0..=1.0, 0.5 = centre
    PitchBend { value: f32 },
    AnalogControls(AnalogReadings),
    Panel(PanelInput),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}
