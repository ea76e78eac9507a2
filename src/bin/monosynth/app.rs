//! Monosynth - audio device setup and the control thread

use std::{thread, time::Duration};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::Consumer;

use saavy_mono::{
    io::{converter::midi_to_synth, midi::decode_packets, AudioOutput},
    synth::{control_channel, SynthConfig, SynthController, SynthMessage, Synthesizer},
    BUFFER_SIZE,
};

use super::phrase::{self, Step};

pub struct Monosynth {
    bpm: f32,
    channel: Option<u8>,
    config: SynthConfig,
}

impl Monosynth {
    pub fn new() -> Self {
        Self {
            bpm: 120.0,
            channel: None,
            config: SynthConfig::default(),
        }
    }

    pub fn tempo(mut self, bpm: f32) -> Self {
        self.bpm = bpm;
        self
    }

    /// Only accept MIDI on this channel (0-based).
    pub fn midi_channel(mut self, channel: u8) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Open the default output, start rendering, and play the demo phrase.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        // The core runs at whatever rate the device asks for
        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        log::info!("sample rate: {} Hz (native {} Hz)", sample_rate, saavy_mono::SAMPLE_RATE);
        log::info!("channels: {}", channels);
        log::info!("block size: {} frames", BUFFER_SIZE);

        let synth_config = SynthConfig {
            sample_rate,
            ..self.config
        };
        let (mut controller, rx) = control_channel(synth_config.control_queue_capacity);
        let mut blocks = BlockStream::new(Synthesizer::from_config(&synth_config), rx);

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| blocks.fill(data, channels),
            |err| log::error!("audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        let beat = Duration::from_secs_f32(60.0 / self.bpm);
        for step in phrase::demo() {
            match step {
                Step::Midi(bytes) => self.send_midi(&mut controller, &bytes),
                Step::Analog(readings) => {
                    log::info!("panel scan {:?}", readings.0);
                    send(&mut controller, SynthMessage::AnalogControls(readings));
                }
                Step::Pin(pin, level) => {
                    if let Err(err) = controller.digital_pin(pin, level) {
                        log::warn!("{}", err);
                    }
                }
                Step::Rest(beats) => thread::sleep(beat.mul_f32(beats)),
            }
        }

        // Let the last release ring out
        thread::sleep(Duration::from_millis(500));
        Ok(())
    }

    fn send_midi(&self, controller: &mut SynthController, bytes: &[u8]) {
        for event in decode_packets(bytes) {
            log::info!("midi {:?}", event);
            if let Some(message) = midi_to_synth(event, self.channel) {
                send(controller, message);
            }
        }
    }
}

impl Default for Monosynth {
    fn default() -> Self {
        Self::new()
    }
}

fn send(controller: &mut SynthController, message: SynthMessage) {
    // Overflow is already logged by the controller; the change is dropped
    let _ = controller.send(message);
}

/// Adapts fixed 32-frame synth blocks to whatever buffer size the device
/// callback asks for.
struct BlockStream {
    synth: Synthesizer,
    rx: Consumer<SynthMessage>,
    block: AudioOutput,
    position: usize,
}

impl BlockStream {
    fn new(synth: Synthesizer, rx: Consumer<SynthMessage>) -> Self {
        Self {
            synth,
            rx,
            block: AudioOutput::new(),
            position: BUFFER_SIZE,
        }
    }

    fn fill(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels) {
            if self.position == BUFFER_SIZE {
                self.synth.process_block(&mut self.rx, &mut self.block);
                self.position = 0;
            }

            let sample = self.block.samples[self.position * 2] as f32 / 32_768.0;
            frame.fill(sample);
            self.position += 1;
        }
    }
}
