use crate::dsp::buffer::DspBuffer;
use crate::dsp::envelope::{Envelope, EnvelopeStage};
use crate::graph::node::{DspNode, NoteEvent, ParamChange};

/// Envelope node scaling every channel of the buffer by a shared level ramp.
///
/// The ramp is rendered once per block (one level per frame) into internal
/// scratch sized at `prepare` time, then multiplied into each channel, so all
/// channels of a voice breathe together. This node owns the voice's activity:
/// note-on drives the envelope into Attack, note-off into Release, and
/// `is_active` mirrors the stage machine.
pub struct EnvelopeNode {
    env: Envelope,
    levels: Vec<f32>,
}

impl EnvelopeNode {
    pub fn new() -> Self {
        Self {
            env: Envelope::new(44_100.0),
            levels: Vec::new(),
        }
    }

    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        let mut node = Self::new();
        node.env.set_parameters(attack, decay, sustain, release);
        node
    }

    /// Current envelope level, for meters and scopes.
    pub fn level(&self) -> f32 {
        self.env.level()
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.env.stage()
    }
}

impl Default for EnvelopeNode {
    fn default() -> Self {
        Self::new()
    }
}

impl DspNode for EnvelopeNode {
    fn prepare(&mut self, sample_rate: f32, block_size: usize) {
        self.env.set_sample_rate(sample_rate);
        if self.levels.len() < block_size {
            self.levels.resize(block_size, 0.0);
        }
    }

    fn process(&mut self, buffer: &mut DspBuffer) {
        let frames = buffer.frames();
        // Tolerate blocks larger than the prepared size; grows only when the
        // configuration actually changed.
        if self.levels.len() < frames {
            self.levels.resize(frames, 0.0);
        }

        for level in &mut self.levels[..frames] {
            *level = self.env.next_level();
        }

        let levels = &self.levels[..frames];
        for channel in buffer.channels_mut() {
            for (sample, &level) in channel.iter_mut().zip(levels) {
                *sample *= level;
            }
        }
    }

    fn reset(&mut self) {
        self.env.enter_stage(EnvelopeStage::Off);
    }

    fn note_on(&mut self, _event: &NoteEvent) {
        self.env.enter_stage(EnvelopeStage::Attack);
    }

    fn note_off(&mut self) {
        self.env.enter_stage(EnvelopeStage::Release);
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }

    fn apply(&mut self, change: ParamChange) {
        if let ParamChange::Envelope {
            attack,
            decay,
            sustain,
            release,
        } = change
        {
            self.env.set_parameters(attack, decay, sustain, release);
        }
    }
}
