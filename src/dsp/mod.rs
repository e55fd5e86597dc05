//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They intentionally stay focused on the
//! signal-processing math so graph nodes can layer on note handling and
//! parameter routing.

/// Planar multi-channel sample storage shared by a node chain.
pub mod buffer;
/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Chamberlin state-variable filter with selectable tap.
pub mod filter;
/// Band-limited oscillator waveforms.
pub mod oscillator;

pub use envelope::EnvelopeStage;
