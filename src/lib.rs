pub mod dsp;
pub mod graph; // Composable processing nodes sharing one planar buffer
pub mod patch;
pub mod scope; // Lock-free audio handoff to visualization consumers
pub mod synth; // Voice management and polyphony

pub use synth::engine::{EngineConfig, SynthEngine};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
