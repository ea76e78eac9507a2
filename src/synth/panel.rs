//! Front-panel control mapping.
//!
//! The panel scanner delivers two kinds of input: a batch of 12-bit ADC
//! readings (one per knob, in a fixed slot order) and single digital pin
//! changes. This module turns both into synthesizer-domain values. All
//! mappings are total: every `u16` maps to something valid.

use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::Waveform;

/// Value per raw ADC unit (~1/4096, full scale of a 12-bit converter).
pub const CONTROL_SCALE: f32 = 0.000_244;
/// Number of knob slots in one analog batch.
pub const ANALOG_SLOTS: usize = 11;
/// The master-gain knob is bypassed: its slot is replaced by this reading.
pub const MASTER_GAIN_OVERRIDE: u16 = 100;

/// Knob slot assignment within an `AnalogReadings` batch.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogSlot {
    Osc1Octave,
    Osc2Octave,
    Detune,
    Osc1Gain,
    Osc2Gain,
    LfoRate,
    Cutoff,
    Resonance,
    Attack,
    Release,
    MasterGain,
}

impl AnalogSlot {
    pub const ALL: [AnalogSlot; ANALOG_SLOTS] = [
        AnalogSlot::Osc1Octave,
        AnalogSlot::Osc2Octave,
        AnalogSlot::Detune,
        AnalogSlot::Osc1Gain,
        AnalogSlot::Osc2Gain,
        AnalogSlot::LfoRate,
        AnalogSlot::Cutoff,
        AnalogSlot::Resonance,
        AnalogSlot::Attack,
        AnalogSlot::Release,
        AnalogSlot::MasterGain,
    ];
}

/// One scan of every knob, raw ADC values in slot order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalogReadings(pub [u16; ANALOG_SLOTS]);

impl AnalogReadings {
    pub fn new(readings: [u16; ANALOG_SLOTS]) -> Self {
        Self(readings)
    }

    /// Builder-style setter for a single slot.
    pub fn with(mut self, slot: AnalogSlot, reading: u16) -> Self {
        self[slot] = reading;
        self
    }
}

impl Index<AnalogSlot> for AnalogReadings {
    type Output = u16;

    fn index(&self, slot: AnalogSlot) -> &u16 {
        &self.0[slot as usize]
    }
}

impl IndexMut<AnalogSlot> for AnalogReadings {
    fn index_mut(&mut self, slot: AnalogSlot) -> &mut u16 {
        &mut self.0[slot as usize]
    }
}

#[inline]
fn unit(reading: u16) -> f32 {
    reading as f32 * CONTROL_SCALE
}

/// Five-position octave switch read through an ADC.
///
/// ```text
/// 0      1229     2048     2867     3686     4095
/// | 0.25 |  0.5   |   1    |   2    |   4    |
/// ```
pub fn octave_from_reading(reading: u16) -> f32 {
    match reading {
        0..=1228 => 0.25,
        1229..=2047 => 0.5,
        2048..=2866 => 1.0,
        2867..=3685 => 2.0,
        _ => 4.0,
    }
}

/// Oscillator-2 frequency ratio, 0.67..1.5.
pub fn detune_from_reading(reading: u16) -> f32 {
    unit(reading) * 0.83 + 0.67
}

/// LFO rate in Hz, 0.05..200.
pub fn lfo_rate_from_reading(reading: u16) -> f32 {
    unit(reading) * 200.0 + 0.05
}

/// Filter cutoff in Hz, 10 Hz up to about Nyquist + 10.
pub fn cutoff_from_reading(reading: u16, sample_rate: f32) -> f32 {
    unit(reading) * sample_rate * 0.5 + 10.0
}

/// Ladder feedback amount k, 0..2.
pub fn resonance_from_reading(reading: u16) -> f32 {
    (reading as f32 * 2.0 * CONTROL_SCALE).min(2.0)
}

pub fn master_gain_from_reading(reading: u16) -> f32 {
    unit(reading).min(1.0)
}

/// A decoded digital panel change.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelInput {
    Osc1Waveform(Waveform),
    Osc2Waveform(Waveform),
    Osc1Mute(bool),
    Osc2Mute(bool),
    LfoWaveform(Waveform),
    Tremolo(bool),
    Vibrato(bool),
    FilterModulation(bool),
    GainEnable(bool),
}

impl PanelInput {
    /// Decode a GPIO pin mask (bit n set = pin n) and the pin's level.
    ///
    /// Waveform selectors are three momentary pins per oscillator; the level
    /// is ignored for them. Toggles take the level as their new state. The
    /// LFO selector is a two-way switch: low = triangle, high = sawtooth.
    pub fn from_pin(pin: u16, level: bool) -> Option<Self> {
        let input = match pin {
            0x0001 => PanelInput::Osc1Waveform(Waveform::Triangle),
            0x0002 => PanelInput::Osc1Waveform(Waveform::Sawtooth),
            0x0004 => PanelInput::Osc1Waveform(Waveform::Square),
            0x0008 => PanelInput::Osc2Waveform(Waveform::Triangle),
            0x0010 => PanelInput::Osc2Waveform(Waveform::Sawtooth),
            0x0020 => PanelInput::Osc2Waveform(Waveform::Square),
            0x0040 => PanelInput::Osc1Mute(level),
            0x0080 => PanelInput::Osc2Mute(level),
            0x0100 => PanelInput::LfoWaveform(if level {
                Waveform::Sawtooth
            } else {
                Waveform::Triangle
            }),
            0x0200 => PanelInput::Tremolo(level),
            0x0400 => PanelInput::Vibrato(level),
            0x0800 => PanelInput::FilterModulation(level),
            0x1000 => PanelInput::GainEnable(level),
            _ => return None,
        };
        Some(input)
    }
}
