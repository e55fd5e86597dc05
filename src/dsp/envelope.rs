use crate::MIN_TIME;

/*
ADSR envelope
=============

A linear five-stage amplitude envelope driven one sample at a time.

    Level
      1.0 |    /\
          |   /  \________
      S   |  /            \
          | /              \
      0.0 |/________________\___ Time
          Attack Decay Sust. Release

The state machine:

    Off --enter(Attack)--> Attack --level>=1--> Decay --level<=S--> Sustain
    Sustain --enter(Release)--> Release --level<=0--> Off

Stage changes come from two places. The level crossings above happen inside
`next_level`. Note handling drives the rest: note-on enters Attack, note-off
enters Release, and entering Off directly hard-resets the envelope.

All time parameters clamp to MIN_TIME at the setter. The per-sample increment
divides by `time * sample_rate`, and that clamp is the guard that keeps the
division defined for zero or denormal inputs.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Off,
    Attack,
    Decay,
    Sustain,
    Release,
}

pub struct Envelope {
    stage: EnvelopeStage,
    sample_rate: f32,
    attack_time: f32,
    decay_time: f32,
    sustain_level: f32,
    release_time: f32,
    level: f32,
}

impl Envelope {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            stage: EnvelopeStage::Off,
            sample_rate,
            attack_time: 0.01,
            decay_time: 0.1,
            sustain_level: 0.7,
            release_time: 0.5,
            level: 0.0,
        }
    }

    pub fn adsr(sample_rate: f32, attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        let mut env = Self::new(sample_rate);
        env.set_parameters(attack, decay, sustain, release);
        env
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    pub fn set_parameters(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        self.attack_time = attack.max(MIN_TIME);
        self.decay_time = decay.max(MIN_TIME);
        self.sustain_level = sustain.clamp(0.0, 1.0);
        self.release_time = release.max(MIN_TIME);
    }

    /// Force a stage from outside the state machine. Entering `Off` resets
    /// the level to zero.
    pub fn enter_stage(&mut self, stage: EnvelopeStage) {
        self.stage = stage;
        if stage == EnvelopeStage::Off {
            self.level = 0.0;
        }
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Off
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// Advance one sample and return the new level. Each call evaluates at
    /// most one stage transition.
    pub fn next_level(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Off => {
                self.level = 0.0;
            }
            EnvelopeStage::Attack => {
                let increment = 1.0 / (self.attack_time * self.sample_rate);
                self.level += increment;
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.enter_stage(EnvelopeStage::Decay);
                }
            }
            EnvelopeStage::Decay => {
                let decrement =
                    (1.0 - self.sustain_level) / (self.decay_time * self.sample_rate);
                self.level -= decrement;
                if self.level <= self.sustain_level {
                    self.level = self.sustain_level;
                    self.enter_stage(EnvelopeStage::Sustain);
                }
            }
            EnvelopeStage::Sustain => {
                self.level = self.sustain_level;
            }
            EnvelopeStage::Release => {
                let decrement = self.sustain_level / (self.release_time * self.sample_rate);
                self.level -= decrement;
                if self.level <= 0.0 {
                    self.level = 0.0;
                    self.enter_stage(EnvelopeStage::Off);
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }
}
