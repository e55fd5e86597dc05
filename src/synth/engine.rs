use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::buffer::DspBuffer;
use crate::dsp::oscillator::Waveform;
use crate::graph::node::ParamChange;
use crate::patch::Patch;
use crate::scope::ScopeBuffer;
use crate::synth::message::{MessageReceiver, SynthMessage};
use crate::synth::voice::Voice;

/// Fixed polyphony. The pool is sized once at construction and never grows.
pub const MAX_VOICES: usize = 8;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub sample_rate: f32,
    pub block_size: usize,
    pub channels: usize,
    /// Gain applied to the summed voice mix. The default keeps worst-case
    /// full-amplitude unison across the whole pool inside output range.
    pub master_volume: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            block_size: 512,
            channels: 2,
            master_volume: 0.2,
        }
    }
}

/// Polyphonic synthesizer engine.
///
/// Owns a fixed pool of [`Voice`] slots, a scratch block for per-voice
/// rendering, and the [`ScopeBuffer`] that mirrors the output for
/// visualization consumers. Note events and parameter setters are expected
/// from a single control thread (or through [`drain_messages`]); `render`
/// runs on the audio thread and allocates nothing at steady state.
///
/// [`drain_messages`]: Self::drain_messages
pub struct SynthEngine {
    voices: Vec<Voice>,
    master_volume: f32,
    scratch: DspBuffer,
    scope: Arc<ScopeBuffer>,
}

impl SynthEngine {
    pub fn new(config: EngineConfig) -> Self {
        let mut voices: Vec<Voice> = (0..MAX_VOICES).map(|_| Voice::new()).collect();
        for voice in &mut voices {
            voice.prepare(config.sample_rate, config.block_size);
        }

        Self {
            voices,
            master_volume: config.master_volume,
            scratch: DspBuffer::new(config.channels, config.block_size),
            scope: Arc::new(ScopeBuffer::default()),
        }
    }

    /// Re-propagate configuration. Not part of the per-block path.
    pub fn prepare(&mut self, sample_rate: f32, block_size: usize) {
        for voice in &mut self.voices {
            voice.prepare(sample_rate, block_size);
        }
        self.scratch.resize(self.scratch.channels(), block_size);
    }

    /// Assign the note to the first inactive voice in index order. When the
    /// whole pool is busy, voice 0 is reassigned. That steal policy is
    /// deliberately simple and fixed; callers wanting age or amplitude
    /// heuristics should track candidates themselves.
    pub fn note_on(&mut self, note: u8, velocity: u8) {
        if let Some(voice) = self.voices.iter_mut().find(|v| !v.is_active()) {
            voice.note_on(note, velocity);
            return;
        }
        self.voices[0].note_on(note, velocity);
    }

    /// Release every active voice currently holding `note`. Duplicate
    /// holders are tolerated; a note nobody holds is a no-op.
    pub fn note_off(&mut self, note: u8) {
        for voice in &mut self.voices {
            if voice.is_active() && voice.note() == Some(note) {
                voice.note_off();
            }
        }
    }

    pub fn all_notes_off(&mut self) {
        for voice in &mut self.voices {
            if voice.is_active() {
                voice.note_off();
            }
        }
    }

    /// Render one block into `output`: clear, sum every active voice through
    /// the shared scratch block, apply master volume, then mirror channel 0
    /// into the scope for visualization.
    pub fn render(&mut self, output: &mut DspBuffer) {
        output.clear();
        // No-op at steady state; reallocates only when the host changes the
        // block layout.
        self.scratch.resize(output.channels(), output.frames());

        for voice in &mut self.voices {
            if !voice.is_active() {
                continue;
            }
            self.scratch.clear();
            voice.render(&mut self.scratch);
            output.add(&self.scratch);
        }

        let master = self.master_volume;
        for channel in output.channels_mut() {
            for sample in channel {
                *sample *= master;
            }
        }

        if output.channels() > 0 {
            self.scope.write(output.channel(0));
        }
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.broadcast(ParamChange::Waveform(waveform));
    }

    pub fn set_filter_cutoff(&mut self, hz: f32) {
        self.broadcast(ParamChange::FilterCutoff(hz));
    }

    pub fn set_filter_resonance(&mut self, amount: f32) {
        self.broadcast(ParamChange::FilterResonance(amount));
    }

    pub fn set_envelope(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        self.broadcast(ParamChange::Envelope {
            attack,
            decay,
            sustain,
            release,
        });
    }

    pub fn set_master_volume(&mut self, gain: f32) {
        self.master_volume = gain;
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Route one patch through the ordinary setters.
    pub fn apply_patch(&mut self, patch: &Patch) {
        self.set_waveform(patch.waveform);
        self.set_filter_cutoff(patch.filter.cutoff_hz);
        self.set_filter_resonance(patch.filter.resonance);
        self.set_envelope(
            patch.envelope.attack,
            patch.envelope.decay,
            patch.envelope.sustain,
            patch.envelope.release,
        );
        self.set_master_volume(patch.master_volume);
    }

    /// Handle to the visualization buffer; clone freely across threads.
    pub fn scope(&self) -> Arc<ScopeBuffer> {
        Arc::clone(&self.scope)
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    /// Apply every queued control message. Called at block boundaries on the
    /// audio thread, before `render`.
    pub fn drain_messages<R: MessageReceiver>(&mut self, receiver: &mut R) {
        while let Some(message) = receiver.pop() {
            self.apply_message(message);
        }
    }

    fn apply_message(&mut self, message: SynthMessage) {
        match message {
            SynthMessage::NoteOn { note, velocity } => self.note_on(note, velocity),
            SynthMessage::NoteOff { note } => self.note_off(note),
            SynthMessage::AllNotesOff => self.all_notes_off(),
            SynthMessage::SetWaveform { index } => {
                if let Some(waveform) = Waveform::from_index(index) {
                    self.set_waveform(waveform);
                }
            }
            SynthMessage::SetFilterCutoff { hz } => self.set_filter_cutoff(hz),
            SynthMessage::SetFilterResonance { amount } => self.set_filter_resonance(amount),
            SynthMessage::SetEnvelope {
                attack,
                decay,
                sustain,
                release,
            } => self.set_envelope(attack, decay, sustain, release),
            SynthMessage::SetMasterVolume { gain } => self.set_master_volume(gain),
        }
    }

    fn broadcast(&mut self, change: ParamChange) {
        for voice in &mut self.voices {
            voice.apply(change);
        }
    }
}
