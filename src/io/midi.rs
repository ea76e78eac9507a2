//! MIDI events and USB-MIDI packet decoding.
//!
//! USB-MIDI moves channel messages in 4-byte event packets:
//!
//! ```text
//! byte 0   cable number (high nibble) | code index (low nibble)
//! byte 1   status   (0x80 note off, 0x90 note on, 0xB0 CC, 0xE0 bend, ...)
//! byte 2   data 1   (key, controller, bend LSB)
//! byte 3   data 2   (velocity, value, bend MSB)
//! ```
//!
//! Only the four channel messages the synthesizer uses are decoded; anything
//! else is skipped.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bytes per USB-MIDI event packet.
pub const PACKET_SIZE: usize = 4;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    /// 14-bit value, 8192 = centre.
    PitchBend { channel: u8, value: u16 },
}

impl MidiEvent {
    /// Decode one channel message from its status and data bytes.
    ///
    /// Data bytes are masked to 7 bits. A note-on with velocity 0 is a
    /// note-off, per running-status convention.
    pub fn from_bytes(status: u8, data1: u8, data2: u8) -> Option<Self> {
        let channel = status & 0x0F;
        let data1 = data1 & 0x7F;
        let data2 = data2 & 0x7F;

        match status & 0xF0 {
            0x80 => Some(MidiEvent::NoteOff {
                channel,
                key: data1,
                velocity: data2,
            }),
            0x90 if data2 == 0 => Some(MidiEvent::NoteOff {
                channel,
                key: data1,
                velocity: 0,
            }),
            0x90 => Some(MidiEvent::NoteOn {
                channel,
                key: data1,
                velocity: data2,
            }),
            0xB0 => Some(MidiEvent::ControlChange {
                channel,
                controller: data1,
                value: data2,
            }),
            0xE0 => Some(MidiEvent::PitchBend {
                channel,
                value: (data1 as u16) | ((data2 as u16) << 7),
            }),
            _ => None,
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::PitchBend { channel, .. } => channel,
        }
    }
}

/// One raw USB-MIDI event packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsbMidiPacket(pub [u8; PACKET_SIZE]);

impl UsbMidiPacket {
    pub fn cable(&self) -> u8 {
        self.0[0] >> 4
    }

    pub fn code_index(&self) -> u8 {
        self.0[0] & 0x0F
    }

    pub fn event(&self) -> Option<MidiEvent> {
        MidiEvent::from_bytes(self.0[1], self.0[2], self.0[3])
    }
}

/// Split a receive buffer into whole packets. A trailing partial packet is
/// dropped.
pub fn packets(buffer: &[u8]) -> impl Iterator<Item = UsbMidiPacket> + '_ {
    buffer
        .chunks_exact(PACKET_SIZE)
        .map(|chunk| UsbMidiPacket([chunk[0], chunk[1], chunk[2], chunk[3]]))
}

/// Decode every recognised event in a receive buffer, in order.
pub fn decode_packets(buffer: &[u8]) -> impl Iterator<Item = MidiEvent> + '_ {
    packets(buffer).filter_map(|packet| {
        let event = packet.event();
        if event.is_none() {
            log::debug!("skipping USB-MIDI packet {:02x?}", packet.0);
        }
        event
    })
}
