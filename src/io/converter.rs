use crate::{io::midi::MidiEvent, synth::message::SynthMessage};

/// Lowest and highest keys on an 88-key keyboard (A0 and C8).
pub const LOWEST_KEY: u8 = 21;
pub const HIGHEST_KEY: u8 = 108;

const KEYS: usize = (HIGHEST_KEY - LOWEST_KEY) as usize + 1;

/// Bend range of the 14-bit pitch wheel.
const BEND_SCALE: f32 = 16_384.0;

pub fn midi_to_synth(midi: MidiEvent, channel_filter: Option<u8>) -> Option<SynthMessage> {
    if let Some(channel) = channel_filter {
        if midi.channel() != channel {
            log::debug!("skipping {:?}, listening on channel {}", midi, channel);
            return None;
        }
    }

    match midi {
        MidiEvent::NoteOn { key, velocity, .. } => {
            let frequency = note_frequency(key)?;
            Some(SynthMessage::NoteOn {
                frequency,
                velocity: unit(velocity),
            })
        }
        MidiEvent::NoteOff { key, velocity, .. } => {
            let frequency = note_frequency(key)?;
            Some(SynthMessage::NoteOff {
                frequency,
                velocity: unit(velocity),
            })
        }
        MidiEvent::ControlChange {
            controller, value, ..
        } => Some(SynthMessage::ControllerChange {
            controller,
            value: unit(value),
        }),
        MidiEvent::PitchBend { value, .. } => Some(SynthMessage::PitchBend {
            value: value as f32 / BEND_SCALE,
        }),
    }
}

fn note_frequency(key: u8) -> Option<f32> {
    let frequency = midi_note_to_freq(key);
    if frequency.is_none() {
        log::debug!("key {} outside the keyboard range", key);
    }
    frequency
}

#[inline]
fn unit(value: u8) -> f32 {
    value as f32 / 127.0
}

/// Equal-tempered frequency of an 88-key note, A4 (69) = 440 Hz.
pub fn midi_note_to_freq(note: u8) -> Option<f32> {
    if !(LOWEST_KEY..=HIGHEST_KEY).contains(&note) {
        return None;
    }
    Some(frequency_table()[(note - LOWEST_KEY) as usize])
}

fn frequency_table() -> &'static [f32; KEYS] {
    static TABLE: std::sync::OnceLock<[f32; KEYS]> = std::sync::OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0.0; KEYS];
        for (i, freq) in table.iter_mut().enumerate() {
            let note = (i + LOWEST_KEY as usize) as f32;
            *freq = 440.0 * 2.0_f32.powf((note - 69.0) / 12.0);
        }
        table
    })
}
