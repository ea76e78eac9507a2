//! Real-world scenario benchmarks.
//!
//! These measure complete synthesizer blocks the way the audio callback
//! drives them.

mod synth;

pub use synth::bench_synth;
