use crate::MIN_TIME;

/*
AR Envelope with Voice Reset
============================

The amplitude envelope of this synthesizer is an ADSR without D: the level
ramps up linearly on note-on, holds at full scale while the key is down, and
ramps down linearly on the last note-off.

Vocabulary
----------

  level       The envelope's current output value (0.0 to 1.0). This multiplies
              the audio sample after the filter.

  stage       Idle, Attack, Sustain or Release.

  increment   How much `level` changes per sample:
                  increment = 1 / (time_seconds * sample_rate)

  voice reset A one-shot flag raised when Release lands on zero. The
              synthesizer consumes it to clear the oscillator accumulators,
              so the leaky integrators start the next note from rest instead
              of carrying DC from the previous one.


The State Machine
-----------------

    ┌──────┐  note_on   ┌────────┐  level=1   ┌─────────┐
    │ Idle │ ─────────→ │ Attack │ ─────────→ │ Sustain │
    └──────┘            └────────┘            └─────────┘
        ↑                    │ note_off            │ note_off
        │    level=0         ↓                     ↓
        └─────────────── ┌─────────┐ ←─────────────┘
          (voice reset)  │ Release │
                         └─────────┘

note_on during Release restarts Attack from the current level (no jump to
zero, no click). note_off while Idle is ignored.


Landing Exactly
---------------

Accumulating `level += increment` drifts by an ulp per step, so after
ceil(T * sr) steps the level can sit at 0.99999994 and need one more sample.
Like the release ramp in a classic ADSR, each ramp snapshots its start level
and its total sample count when it begins, and interpolates from those. The
ramp then hits 1.0 (or 0.0) on its final sample.


Time Mapping
------------

Panel knobs arrive as raw 12-bit readings. They map to seconds with

    time = reading * 0.000244 + MIN_TIME

so a reading of zero still yields a strictly positive time.
*/

/// Seconds per raw control unit for attack/release knobs (~1/4096).
pub const TIME_PER_UNIT: f32 = 0.000_244;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // level = 0
    Attack,  // ramping toward 1.0
    Sustain, // holding at 1.0 until note_off
    Release, // ramping toward 0.0
}

pub struct Envelope {
    sample_rate: f32,
    attack_time: f32,  // seconds for a full 0 → 1 ramp
    release_time: f32, // seconds for a full 1 → 0 ramp

    state: EnvelopeState,
    level: f32,
    increment: f32,

    // Ramp bookkeeping, snapshotted when Attack or Release begins
    ramp_start_level: f32,
    ramp_total_samples: u32,
    ramp_elapsed_samples: u32,

    voice_reset: bool,
}

impl Envelope {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            attack_time: MIN_TIME,
            release_time: MIN_TIME,

            state: EnvelopeState::Idle,
            level: 0.0,
            increment: 0.0,

            ramp_start_level: 0.0,
            ramp_total_samples: 1,
            ramp_elapsed_samples: 0,

            voice_reset: false,
        }
    }

    /// Create an envelope with explicit times in seconds.
    pub fn ar(sample_rate: f32, attack: f32, release: f32) -> Self {
        let mut env = Self::new(sample_rate);
        env.attack_time = attack.max(MIN_TIME);
        env.release_time = release.max(MIN_TIME);
        env
    }

    /// Map a raw control reading to the attack time.
    pub fn set_attack(&mut self, reading: u16) {
        self.attack_time = time_from_reading(reading);
    }

    /// Map a raw control reading to the release time.
    pub fn set_release(&mut self, reading: u16) {
        self.release_time = time_from_reading(reading);
    }

    /// Gate high: ramp from the current level up to 1.0.
    pub fn note_on(&mut self) {
        let samples = self.attack_time * self.sample_rate;
        self.increment = 1.0 / samples;
        self.begin_ramp(samples * (1.0 - self.level));
        self.state = EnvelopeState::Attack;
    }

    /// Gate low: ramp from the current level down to 0.0.
    pub fn note_off(&mut self) {
        if self.state == EnvelopeState::Idle {
            return;
        }

        let samples = self.release_time * self.sample_rate;
        self.increment = 1.0 / samples;
        self.begin_ramp(samples * self.level);
        self.state = EnvelopeState::Release;
    }

    fn begin_ramp(&mut self, samples: f32) {
        self.ramp_start_level = self.level;
        self.ramp_total_samples = (samples.ceil() as u32).max(1);
        self.ramp_elapsed_samples = 0;
    }

    /// Advance one sample and return the new level.
    pub fn next_level(&mut self) -> f32 {
        match self.state {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.ramp_elapsed_samples += 1;
                let travelled = self.ramp_elapsed_samples as f32 * self.increment;
                self.level = (self.ramp_start_level + travelled).min(1.0);

                if self.ramp_elapsed_samples >= self.ramp_total_samples || self.level >= 1.0 {
                    self.level = 1.0;
                    self.state = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                self.level = 1.0;
            }

            EnvelopeState::Release => {
                self.ramp_elapsed_samples += 1;
                let travelled = self.ramp_elapsed_samples as f32 * self.increment;
                self.level = (self.ramp_start_level - travelled).max(0.0);

                if self.ramp_elapsed_samples >= self.ramp_total_samples || self.level <= 0.0 {
                    self.level = 0.0;
                    self.state = EnvelopeState::Idle;
                    self.voice_reset = true;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Multiply a block of samples by successive envelope levels.
    pub fn apply(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample *= self.next_level();
        }
    }

    /// Consume the voice-reset signal. Returns true once per Release → Idle.
    pub fn take_voice_reset(&mut self) -> bool {
        std::mem::take(&mut self.voice_reset)
    }

    pub fn is_active(&self) -> bool {
        self.state != EnvelopeState::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    pub fn attack_time(&self) -> f32 {
        self.attack_time
    }

    pub fn release_time(&self) -> f32 {
        self.release_time
    }
}

#[inline]
fn time_from_reading(reading: u16) -> f32 {
    reading as f32 * TIME_PER_UNIT + MIN_TIME
}
