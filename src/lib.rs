pub mod dsp;
pub mod io; // MIDI boundary, output block format
pub mod synth; // Orchestration, control messages, panel mapping

/// Frames rendered per call to `Synthesizer::process_block`.
pub const BUFFER_SIZE: usize = 32;
/// Native rate of the target DAC clock.
pub const SAMPLE_RATE: f32 = 48_828.0;
/// Shortest attack/release time. Added to every mapped time so the envelope
/// increment never divides by zero.
pub const MIN_TIME: f32 = 0.0001;
