use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Band-limited oscillator
=======================

Sine and triangle are computed directly from phase. They carry no step
discontinuity (triangle only has a low-order kink), so naive evaluation stays
clean at audio rates.

Saw and square are different: their jumps spray aliasing across the spectrum
when sampled naively. Both get a PolyBLEP correction, a small polynomial
blended in around each discontinuity that cancels the worst of the aliased
energy. The square has two jumps per cycle and applies the correction twice,
the second shifted by half a period.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Saw,
    Square,
}

impl Waveform {
    /// Map an external selector index to a waveform. Out-of-range indices
    /// yield `None` and callers treat the request as a no-op.
    pub fn from_index(index: usize) -> Option<Waveform> {
        match index {
            0 => Some(Waveform::Sine),
            1 => Some(Waveform::Triangle),
            2 => Some(Waveform::Saw),
            3 => Some(Waveform::Square),
            _ => None,
        }
    }
}

/// Fixed output scaling so a single oscillator stays well below full scale
/// before voices are mixed.
pub const HEADROOM: f32 = 0.2;

pub struct Oscillator {
    phase: f32,
    phase_increment: f32,
    frequency: f32,
    sample_rate: f32,
    waveform: Waveform,
}

impl Oscillator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_increment: 0.0,
            frequency: 440.0,
            sample_rate,
            waveform: Waveform::Sine,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Negative input clamps to zero; a 0 Hz oscillator holds a constant
    /// sample instead of wrapping phase backwards.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency.max(0.0);
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Produce one sample and advance phase. The increment is recomputed from
    /// the current frequency every call, so frequency changes mid-block take
    /// effect on the next sample without a phase jump.
    pub fn next_sample(&mut self) -> f32 {
        self.phase_increment = TAU * self.frequency / self.sample_rate;
        // Normalized phase 0..1
        let t = self.phase / TAU;

        let sample = match self.waveform {
            Waveform::Sine => self.phase.sin(),
            Waveform::Triangle => {
                if t < 0.5 {
                    -1.0 + 4.0 * t
                } else {
                    3.0 - 4.0 * t
                }
            }
            Waveform::Saw => {
                let naive = 2.0 * t - 1.0;
                // Correct the jump at the cycle boundary, then flip so the
                // ramp runs downward.
                -(naive - self.poly_blep(t))
            }
            Waveform::Square => {
                let naive = if t < 0.5 { 1.0 } else { -1.0 };
                // One correction per edge: the rising edge at 0 and the
                // falling edge half a period later.
                let pb = self.poly_blep(t) - self.poly_blep((t + 0.5).fract());
                naive + pb
            }
        };

        self.phase += self.phase_increment;
        // Wrap by subtraction so phase stays continuous across frequency
        // changes; the loop keeps any positive frequency in range.
        while self.phase >= TAU {
            self.phase -= TAU;
        }

        sample * HEADROOM
    }

    // Polynomial band-limited step. `t` is the normalized phase offset
    // relative to the discontinuity; only samples within one increment of an
    // edge receive a correction.
    fn poly_blep(&self, mut t: f32) -> f32 {
        let dt = self.phase_increment / TAU;
        if t < dt {
            t /= dt;
            t + t - t * t - 1.0
        } else if t > 1.0 - dt {
            t = (t - 1.0) / dt;
            t * t + t + t + 1.0
        } else {
            0.0
        }
    }
}
