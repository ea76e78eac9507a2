// Purpose: Orchestration of the DSP chain and the control-rate surface
// Messages from MIDI and the panel are queued here and applied between blocks

pub mod config;
#[cfg(feature = "rtrb")]
pub mod controller;
pub mod defaults;
pub mod message;
pub mod panel;
pub mod synthesizer;

pub use config::SynthConfig;
#[cfg(feature = "rtrb")]
pub use controller::{control_channel, ControlError, SynthController};
pub use message::{MessageReceiver, SynthMessage};
pub use panel::{AnalogReadings, AnalogSlot, PanelInput};
pub use synthesizer::Synthesizer;
