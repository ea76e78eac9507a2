//! The monophonic synthesizer: two oscillators, a mixer, a ladder filter and
//! an AR envelope, modulated by one shared LFO.
//!
//! ```text
//!            ┌──────── LFO ───────────┬────────────┬──────────┐
//!            │ (vibrato)              │ (cutoff)   │ (tremolo)│
//!            ▼                        ▼            ▼          │
//!   note ─► OSC 1 ─┐                                          │
//!                  ├─► MIXER ─► LADDER ─► ENVELOPE ─► GAIN ─► i16 L/R
//!   note ─► OSC 2 ─┘
//! ```
//!
//! Every control-rate change arrives as a `SynthMessage` and is applied
//! between blocks; the per-sample loop only reads parameters.

use crate::{
    dsp::{
        envelope::Envelope, filter::LadderFilter, lfo::Lfo,
        mixer::{Mixer, MixerChannel},
        oscillator::Oscillator,
    },
    io::{quantize, AudioOutput},
    synth::{
        config::SynthConfig,
        defaults,
        message::{MessageReceiver, SynthMessage},
        panel::{
            cutoff_from_reading, detune_from_reading, lfo_rate_from_reading,
            master_gain_from_reading, octave_from_reading, resonance_from_reading,
            AnalogReadings, AnalogSlot, PanelInput, MASTER_GAIN_OVERRIDE,
        },
    },
    BUFFER_SIZE,
};

/// MIDI controller numbers the synthesizer listens to.
pub mod cc {
    pub const MOD_WHEEL: u8 = 1;
    pub const CHANNEL_VOLUME: u8 = 7;
    pub const PAN: u8 = 10;
    pub const SUSTAIN_PEDAL: u8 = 64;
}

/// Controllers that are stored but not yet routed to the audio path.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecordedControllers {
    pub channel_volume: f32,
    pub pan: f32,
    pub sustain_pedal: f32,
}

/// Routing switches from the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModulationRouting {
    pub tremolo: bool,
    pub vibrato: bool,
    pub filter_modulation: bool,
    pub gain_enabled: bool,
}

impl Default for ModulationRouting {
    fn default() -> Self {
        Self {
            tremolo: defaults::TREMOLO,
            vibrato: defaults::VIBRATO,
            filter_modulation: defaults::FILTER_MODULATION,
            gain_enabled: defaults::GAIN_ENABLED,
        }
    }
}

pub struct Synthesizer {
    sample_rate: f32,

    lfo: Lfo,
    oscillators: [Oscillator; 2],
    mixer: Mixer,
    filter: LadderFilter,
    envelope: Envelope,

    // Performance state
    note_frequency: f32,
    velocity: f32,
    pitch_bend: f32,
    mod_wheel: f32,
    note_count: i32,
    controllers: RecordedControllers,

    // Panel state
    octave: [f32; 2],
    detune: f32,
    filter_cutoff: f32,
    master_gain: f32,
    routing: ModulationRouting,
}

impl Synthesizer {
    pub fn new(sample_rate: f32) -> Self {
        let mut lfo = Lfo::new(sample_rate);
        lfo.set_waveform(defaults::LFO_WAVEFORM);
        lfo.set_frequency(defaults::LFO_RATE);

        let mut oscillators = [Oscillator::new(sample_rate), Oscillator::new(sample_rate)];
        for osc in oscillators.iter_mut() {
            osc.set_waveform(defaults::OSC_WAVEFORM);
        }

        let mut filter = LadderFilter::new(sample_rate);
        filter.set_cutoff(defaults::FILTER_CUTOFF);
        filter.set_resonance(defaults::FILTER_RESONANCE);

        Self {
            sample_rate,
            lfo,
            oscillators,
            mixer: Mixer::new(),
            filter,
            envelope: Envelope::new(sample_rate),

            note_frequency: defaults::NOTE_FREQUENCY,
            velocity: defaults::VELOCITY,
            pitch_bend: defaults::PITCH_BEND,
            mod_wheel: defaults::MOD_WHEEL,
            note_count: 0,
            controllers: RecordedControllers::default(),

            octave: [defaults::OCTAVE; 2],
            detune: defaults::DETUNE,
            filter_cutoff: defaults::FILTER_CUTOFF,
            master_gain: defaults::MASTER_GAIN,
            routing: ModulationRouting::default(),
        }
    }

    pub fn from_config(config: &SynthConfig) -> Self {
        Self::new(config.sample_rate)
    }

    // --- Performance input ---

    pub fn note_on(&mut self, frequency: f32, velocity: f32) {
        self.note_frequency = frequency;
        self.velocity = velocity;
        self.note_count += 1;
        self.envelope.note_on();
    }

    /// Release only once every held note has been let go. Extra note-offs
    /// never push the counter below zero.
    pub fn note_off(&mut self, _frequency: f32, velocity: f32) {
        self.velocity = velocity;
        self.note_count = (self.note_count - 1).max(0);
        if self.note_count == 0 {
            self.envelope.note_off();
        }
    }

    pub fn controller_change(&mut self, controller: u8, value: f32) {
        match controller {
            cc::MOD_WHEEL => self.mod_wheel = value,
            cc::CHANNEL_VOLUME => self.controllers.channel_volume = value,
            cc::PAN => self.controllers.pan = value,
            cc::SUSTAIN_PEDAL => self.controllers.sustain_pedal = value,
            _ => {}
        }
    }

    /// 0.0..=1.0, 0.5 = no bend.
    pub fn pitch_bend(&mut self, value: f32) {
        self.pitch_bend = value;
    }

    // --- Panel input ---

    /// Apply a full scan of the panel knobs.
    pub fn parameters_changed_analog(&mut self, readings: &AnalogReadings) {
        let readings = readings.with(AnalogSlot::MasterGain, MASTER_GAIN_OVERRIDE);

        self.octave[0] = octave_from_reading(readings[AnalogSlot::Osc1Octave]);
        self.octave[1] = octave_from_reading(readings[AnalogSlot::Osc2Octave]);
        self.detune = detune_from_reading(readings[AnalogSlot::Detune]);

        self.mixer.set_gain(MixerChannel::Osc1, readings[AnalogSlot::Osc1Gain]);
        self.mixer.set_gain(MixerChannel::Osc2, readings[AnalogSlot::Osc2Gain]);

        self.lfo
            .set_frequency(lfo_rate_from_reading(readings[AnalogSlot::LfoRate]));

        self.filter_cutoff = cutoff_from_reading(readings[AnalogSlot::Cutoff], self.sample_rate);
        self.filter
            .set_resonance(resonance_from_reading(readings[AnalogSlot::Resonance]));

        self.envelope.set_attack(readings[AnalogSlot::Attack]);
        self.envelope.set_release(readings[AnalogSlot::Release]);

        self.master_gain = master_gain_from_reading(readings[AnalogSlot::MasterGain]);
    }

    pub fn parameters_changed_digital(&mut self, input: PanelInput) {
        match input {
            PanelInput::Osc1Waveform(waveform) => self.oscillators[0].set_waveform(waveform),
            PanelInput::Osc2Waveform(waveform) => self.oscillators[1].set_waveform(waveform),
            PanelInput::Osc1Mute(muted) => self.mixer.set_mute(MixerChannel::Osc1, muted),
            PanelInput::Osc2Mute(muted) => self.mixer.set_mute(MixerChannel::Osc2, muted),
            PanelInput::LfoWaveform(waveform) => self.lfo.set_waveform(waveform),
            PanelInput::Tremolo(on) => self.routing.tremolo = on,
            PanelInput::Vibrato(on) => self.routing.vibrato = on,
            PanelInput::FilterModulation(on) => self.routing.filter_modulation = on,
            PanelInput::GainEnable(on) => self.routing.gain_enabled = on,
        }
    }

    pub fn apply(&mut self, message: SynthMessage) {
        match message {
            SynthMessage::NoteOn {
                frequency,
                velocity,
            } => self.note_on(frequency, velocity),
            SynthMessage::NoteOff {
                frequency,
                velocity,
            } => self.note_off(frequency, velocity),
            SynthMessage::ControllerChange { controller, value } => {
                self.controller_change(controller, value)
            }
            SynthMessage::PitchBend { value } => self.pitch_bend(value),
            SynthMessage::AnalogControls(readings) => self.parameters_changed_analog(&readings),
            SynthMessage::Panel(input) => self.parameters_changed_digital(input),
        }
    }

    // --- Audio ---

    /// Drain pending control messages, then render one block.
    pub fn process_block<R: MessageReceiver + ?Sized>(&mut self, rx: &mut R, out: &mut AudioOutput) {
        while let Some(message) = rx.pop() {
            self.apply(message);
        }
        self.render_block(out);
    }

    /// Render one block with the current parameters.
    pub fn render_block(&mut self, out: &mut AudioOutput) {
        for frame in 0..BUFFER_SIZE {
            let sample = self.next_sample();
            out.set_frame(frame, quantize(sample));
        }
    }

    /// One output sample before quantisation, nominally ±1.0.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        // Shared modulation
        let lfo = self.lfo.next_sample();
        let mod_amount = self.mod_wheel * lfo * 0.5;

        let base = self.note_frequency * bend_multiplier(self.pitch_bend);
        let mut frequency = base;
        if self.routing.vibrato {
            frequency += base * mod_amount;
        }
        let osc1_frequency = frequency * self.octave[0];
        let osc2_frequency = frequency * self.detune * self.octave[1];

        let mut cutoff = self.filter_cutoff;
        if self.routing.filter_modulation {
            cutoff += self.filter_cutoff * mod_amount;
        }

        // Sources
        self.oscillators[0].set_frequency(osc1_frequency);
        self.oscillators[1].set_frequency(osc2_frequency);
        let a = self.oscillators[0].next_sample();
        let b = self.oscillators[1].next_sample();
        let mut sample = self.mixer.mix(a, b);

        self.filter.set_cutoff(cutoff);
        sample = self.filter.process(sample);

        sample *= self.envelope.next_level();
        if self.envelope.take_voice_reset() {
            for osc in self.oscillators.iter_mut() {
                osc.clear_accumulators();
            }
        }

        if self.routing.tremolo {
            sample += lfo * self.mod_wheel * sample;
        }

        let gain = if self.routing.gain_enabled {
            self.master_gain
        } else {
            0.0
        };
        sample * gain
    }

    // --- Accessors ---

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn oscillators(&self) -> &[Oscillator; 2] {
        &self.oscillators
    }

    pub fn lfo(&self) -> &Lfo {
        &self.lfo
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    pub fn filter(&self) -> &LadderFilter {
        &self.filter
    }

    pub fn note_frequency(&self) -> f32 {
        self.note_frequency
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn note_count(&self) -> i32 {
        self.note_count
    }

    pub fn mod_wheel(&self) -> f32 {
        self.mod_wheel
    }

    pub fn recorded_controllers(&self) -> RecordedControllers {
        self.controllers
    }

    pub fn octaves(&self) -> [f32; 2] {
        self.octave
    }

    pub fn detune(&self) -> f32 {
        self.detune
    }

    pub fn filter_cutoff(&self) -> f32 {
        self.filter_cutoff
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    pub fn routing(&self) -> ModulationRouting {
        self.routing
    }
}

/// Linear remap of `value` from `[in_min, in_max]` to `[out_min, out_max]`.
#[inline]
fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (out_max - out_min) * (value - in_min) / (in_max - in_min)
}

#[inline]
fn bend_up(pitch_bend: f32) -> f32 {
    remap(pitch_bend, 0.5, 1.0, 1.0, 2.0)
}

#[inline]
fn bend_down(pitch_bend: f32) -> f32 {
    remap(pitch_bend, 0.0, 0.5, 0.5, 1.0)
}

/// Frequency multiplier for a wheel position: one octave down at 0.0, none
/// at 0.5, one octave up at 1.0. Piecewise linear on each side.
#[inline]
pub fn bend_multiplier(pitch_bend: f32) -> f32 {
    if pitch_bend >= 0.5 {
        bend_up(pitch_bend)
    } else {
        bend_down(pitch_bend)
    }
}
