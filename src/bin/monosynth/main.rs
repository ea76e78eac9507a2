//! monosynth - desktop host for the synthesizer core
//!
//! Run with: cargo run --bin monosynth

mod app;
mod phrase;

use app::Monosynth;
use simple_logger::SimpleLogger;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    Monosynth::new().tempo(110.0).midi_channel(0).run()
}
