#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::oscillator::Waveform;

/// One engine-wide sound, as plain data.
///
/// A patch is sugar over the engine's public setters: external preset storage
/// deserializes into this struct and hands it to
/// [`SynthEngine::apply_patch`](crate::SynthEngine::apply_patch). File
/// formats and persistence live with the caller, not here.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Patch {
    pub name: String,
    pub waveform: Waveform,
    pub filter: FilterSettings,
    pub envelope: EnvelopeSettings,
    pub master_volume: f32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct FilterSettings {
    pub cutoff_hz: f32,
    pub resonance: f32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeSettings {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Default for Patch {
    fn default() -> Self {
        Self {
            name: "Init".to_string(),
            waveform: Waveform::Saw,
            filter: FilterSettings {
                cutoff_hz: 2_000.0,
                resonance: 0.5,
            },
            envelope: EnvelopeSettings {
                attack: 0.01,
                decay: 0.1,
                sustain: 0.7,
                release: 0.5,
            },
            master_volume: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineConfig, SynthEngine};

    #[test]
    fn default_patch_matches_engine_defaults() {
        let patch = Patch::default();
        assert_eq!(patch.waveform, Waveform::Saw);
        assert!(patch.envelope.attack > 0.0);
        assert!((0.0..=1.0).contains(&patch.envelope.sustain));
        assert!((0.0..=0.99).contains(&patch.filter.resonance));
    }

    #[test]
    fn applying_a_patch_keeps_the_engine_playable() {
        let mut engine = SynthEngine::new(EngineConfig::default());
        let patch = Patch {
            name: "Bright Lead".to_string(),
            waveform: Waveform::Square,
            filter: FilterSettings {
                cutoff_hz: 5_000.0,
                resonance: 0.8,
            },
            envelope: EnvelopeSettings {
                attack: 0.005,
                decay: 0.05,
                sustain: 0.6,
                release: 0.1,
            },
            master_volume: 0.15,
        };

        engine.apply_patch(&patch);
        assert_eq!(engine.master_volume(), 0.15);

        engine.note_on(69, 100);
        let mut output = crate::dsp::buffer::DspBuffer::new(2, 256);
        engine.render(&mut output);
        assert!(output.channel(0).iter().any(|&s| s != 0.0));
    }
}
