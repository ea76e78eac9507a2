//! Producer side of the control queue.
//!
//! The MIDI decoder and panel scanner run outside the audio context. They
//! never touch the `Synthesizer`; they push `SynthMessage`s into a lock-free
//! single-producer/single-consumer ring, and the synthesizer drains it before
//! the first sample of each block. A block therefore always renders with one
//! consistent parameter snapshot.

use rtrb::{Consumer, Producer, PushError, RingBuffer};
use thiserror::Error;

use crate::synth::{
    message::SynthMessage,
    panel::{AnalogReadings, PanelInput},
};

#[derive(Debug, Error)]
pub enum ControlError {
    /// The audio context has not drained the queue; the change was dropped.
    #[error("control queue is full, dropped {0:?}")]
    QueueFull(SynthMessage),
}

/// Create a control queue with room for `capacity` pending messages.
pub fn control_channel(capacity: usize) -> (SynthController, Consumer<SynthMessage>) {
    let (tx, rx) = RingBuffer::new(capacity);
    (SynthController { tx }, rx)
}

pub struct SynthController {
    tx: Producer<SynthMessage>,
}

impl SynthController {
    pub fn send(&mut self, message: SynthMessage) -> Result<(), ControlError> {
        match self.tx.push(message) {
            Ok(()) => Ok(()),
            Err(PushError::Full(message)) => {
                log::warn!("control queue full, dropping {:?}", message);
                Err(ControlError::QueueFull(message))
            }
        }
    }

    pub fn note_on(&mut self, frequency: f32, velocity: f32) -> Result<(), ControlError> {
        self.send(SynthMessage::NoteOn {
            frequency,
            velocity,
        })
    }

    pub fn note_off(&mut self, frequency: f32, velocity: f32) -> Result<(), ControlError> {
        self.send(SynthMessage::NoteOff {
            frequency,
            velocity,
        })
    }

    pub fn controller_change(&mut self, controller: u8, value: f32) -> Result<(), ControlError> {
        self.send(SynthMessage::ControllerChange { controller, value })
    }

    pub fn pitch_bend(&mut self, value: f32) -> Result<(), ControlError> {
        self.send(SynthMessage::PitchBend { value })
    }

    pub fn analog_controls(&mut self, readings: AnalogReadings) -> Result<(), ControlError> {
        self.send(SynthMessage::AnalogControls(readings))
    }

    /// Forward a GPIO change. Pins with no panel function are ignored and
    /// return `Ok(false)`.
    pub fn digital_pin(&mut self, pin: u16, level: bool) -> Result<bool, ControlError> {
        match PanelInput::from_pin(pin, level) {
            Some(input) => self.send(SynthMessage::Panel(input)).map(|()| true),
            None => {
                log::debug!("ignoring unmapped panel pin {:#06x}", pin);
                Ok(false)
            }
        }
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}
