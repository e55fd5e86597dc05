use crate::dsp::buffer::DspBuffer;
use crate::dsp::oscillator::Waveform;

/// Convert a MIDI note number to a frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// A note event delivered to every node in a graph.
///
/// Carries the resolved frequency and a normalized velocity so nodes never
/// need to understand MIDI numbering themselves.
#[derive(Debug, Clone, Copy)]
pub struct NoteEvent {
    pub frequency: f32,
    /// Normalized 0.0..=1.0
    pub velocity: f32,
}

impl NoteEvent {
    /// Build an event from MIDI note and velocity (keyboard use case).
    pub fn from_midi(note: u8, velocity: u8) -> Self {
        Self {
            frequency: midi_note_to_freq(note),
            velocity: velocity as f32 / 127.0,
        }
    }

    /// Build an event from a direct frequency (test and tooling use case).
    pub fn from_freq(frequency: f32, velocity: f32) -> Self {
        Self {
            frequency,
            velocity,
        }
    }
}

/// A parameter update broadcast through a graph. Each node applies the
/// variants it understands and ignores the rest, so callers never need to
/// know which node position holds which parameter.
#[derive(Debug, Clone, Copy)]
pub enum ParamChange {
    Waveform(Waveform),
    FilterCutoff(f32),
    FilterResonance(f32),
    Envelope {
        attack: f32,
        decay: f32,
        sustain: f32,
        release: f32,
    },
}

/// Core trait for processing units composed into a graph.
///
/// The processing contract is `prepare` then `process`: configuration is
/// propagated before rendering, and `process` reads and/or transforms the
/// shared buffer in place. A node must tolerate the buffer changing channel
/// or frame counts between prepares; per-channel state grows on demand.
///
/// The remaining methods are lifecycle hooks with no-op defaults. They let an
/// owner drive nodes it only knows as trait objects, which keeps the graph
/// the single extension point: swapping a concrete node implementation never
/// requires changes to the voice or engine above it.
pub trait DspNode: Send {
    fn prepare(&mut self, sample_rate: f32, block_size: usize);

    fn process(&mut self, buffer: &mut DspBuffer);

    /// Drop internal processing state (filter registers, envelopes).
    fn reset(&mut self) {}

    /// Triggered when a note starts. Default implementation does nothing.
    fn note_on(&mut self, _event: &NoteEvent) {}

    /// Triggered when a note is released. Default implementation does nothing.
    fn note_off(&mut self) {}

    /// Whether this node is still producing sound.
    ///
    /// Voice management uses this to know when a slot can be reused. Sources
    /// default to `false` so activity is owned by whichever node shapes
    /// amplitude.
    fn is_active(&self) -> bool {
        false
    }

    /// Apply a broadcast parameter change. Default implementation ignores it.
    fn apply(&mut self, _change: ParamChange) {}
}

/// Allow boxed nodes to be used as nodes (for dynamic dispatch).
impl DspNode for Box<dyn DspNode> {
    fn prepare(&mut self, sample_rate: f32, block_size: usize) {
        (**self).prepare(sample_rate, block_size)
    }

    fn process(&mut self, buffer: &mut DspBuffer) {
        (**self).process(buffer)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn note_on(&mut self, event: &NoteEvent) {
        (**self).note_on(event)
    }

    fn note_off(&mut self) {
        (**self).note_off()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn apply(&mut self, change: ParamChange) {
        (**self).apply(change)
    }
}
