use crate::dsp::buffer::DspBuffer;
use crate::graph::envelope::EnvelopeNode;
use crate::graph::filter::FilterNode;
use crate::graph::node::{DspNode, NoteEvent, ParamChange};
use crate::graph::oscillator::OscillatorNode;
use crate::graph::DspGraph;
use crate::dsp::oscillator::Waveform;

/// One polyphonic slot.
///
/// A voice is created once at engine start and reused across notes, never
/// destroyed. It owns its processing chain as a [`DspGraph`] and only talks
/// to it through the node trait, so the chain contents can change without
/// touching voice or engine code. Activity is driven purely by the chain
/// (in the default chain, by the envelope): the voice is active from the
/// moment the envelope leaves Off until it re-enters Off.
pub struct Voice {
    graph: DspGraph,
    note: Option<u8>,
    velocity: f32,
}

impl Voice {
    /// Default subtractive chain: oscillator into filter into envelope.
    pub fn new() -> Self {
        let graph = DspGraph::new()
            .with_node(OscillatorNode::new(Waveform::Saw))
            .with_node(FilterNode::lowpass(2_000.0))
            .with_node(EnvelopeNode::new());
        Self::with_graph(graph)
    }

    /// Build a voice around a custom chain.
    pub fn with_graph(graph: DspGraph) -> Self {
        Self {
            graph,
            note: None,
            velocity: 0.0,
        }
    }

    pub fn prepare(&mut self, sample_rate: f32, block_size: usize) {
        self.graph.prepare(sample_rate, block_size);
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) {
        self.note = Some(note);
        self.velocity = velocity as f32 / 127.0;
        let event = NoteEvent::from_midi(note, velocity);
        self.graph.note_on(&event);
    }

    /// Start the release tail. The note identity is retained so the engine
    /// can still match this voice while it rings out.
    pub fn note_off(&mut self) {
        self.graph.note_off();
    }

    pub fn is_active(&self) -> bool {
        self.graph.is_active()
    }

    pub fn note(&self) -> Option<u8> {
        self.note
    }

    pub fn apply(&mut self, change: ParamChange) {
        self.graph.apply(change);
    }

    pub fn reset(&mut self) {
        self.graph.reset();
        self.note = None;
        self.velocity = 0.0;
    }

    /// Render one block: the chain fills and shapes the buffer in place,
    /// then every sample of every channel scales by the note velocity.
    pub fn render(&mut self, buffer: &mut DspBuffer) {
        self.graph.process(buffer);

        let velocity = self.velocity;
        for channel in buffer.channels_mut() {
            for sample in channel {
                *sample *= velocity;
            }
        }
    }
}

impl Default for Voice {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;
    const BLOCK: usize = 64;

    fn prepared_voice() -> Voice {
        let mut voice = Voice::new();
        voice.prepare(SAMPLE_RATE, BLOCK);
        voice
    }

    #[test]
    fn inactive_until_note_on() {
        let mut voice = prepared_voice();
        assert!(!voice.is_active());

        voice.note_on(69, 100);
        assert!(voice.is_active());
    }

    #[test]
    fn renders_audio_for_a_held_note() {
        let mut voice = prepared_voice();
        voice.note_on(69, 127);

        let mut buffer = DspBuffer::new(2, BLOCK);
        voice.render(&mut buffer);

        assert!(buffer.channel(0).iter().any(|&s| s != 0.0));
        assert_eq!(buffer.channel(0), buffer.channel(1));
    }

    #[test]
    fn zero_velocity_renders_silence() {
        let mut voice = prepared_voice();
        voice.note_on(69, 0);

        let mut buffer = DspBuffer::new(1, BLOCK);
        voice.render(&mut buffer);
        assert!(buffer.channel(0).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn note_identity_survives_release() {
        let mut voice = prepared_voice();
        voice.note_on(60, 100);
        voice.note_off();

        assert_eq!(voice.note(), Some(60));
        assert!(voice.is_active(), "release tail should remain audible");
    }

    #[test]
    fn release_eventually_deactivates() {
        let mut voice = prepared_voice();
        voice.apply(ParamChange::Envelope {
            attack: 0.001,
            decay: 0.001,
            sustain: 0.5,
            release: 0.001,
        });
        voice.note_on(72, 100);

        let mut buffer = DspBuffer::new(1, BLOCK);
        // Let attack and decay finish, then release.
        for _ in 0..4 {
            buffer.clear();
            voice.render(&mut buffer);
        }
        voice.note_off();
        for _ in 0..4 {
            buffer.clear();
            voice.render(&mut buffer);
        }

        assert!(!voice.is_active());
    }

    #[test]
    fn reset_clears_note_state() {
        let mut voice = prepared_voice();
        voice.note_on(60, 100);
        voice.reset();

        assert!(!voice.is_active());
        assert_eq!(voice.note(), None);
    }
}
