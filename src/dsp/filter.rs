use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| tap       | passes          | rejects      |
| --------- | --------------- | ------------ |
| low-pass  | below cutoff    | above cutoff |
| high-pass | above cutoff    | below cutoff |
| band-pass | around cutoff   | both sides   |

Chamberlin state-variable topology: two integrator registers (band, low)
produce all taps from shared state each sample. Coefficients are derived once
per parameter change, never per sample:

    f = 2 * sin(pi * cutoff / sample_rate)
    q = 1 - resonance

The resonance setter clamps to [0, 0.99]. q <= 0 makes the recurrence
divergent, so the unstable region is unreachable through the public surface.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
}

/// All taps produced by one tick of the recurrence.
pub struct FilterOutputs {
    pub lowpass: f32,
    pub highpass: f32,
    pub bandpass: f32,
    pub notch: f32,
}

#[derive(Clone)]
pub struct SvFilter {
    sample_rate: f32,
    cutoff_hz: f32,
    resonance: f32,
    filter_type: FilterType,
    // Derived coefficients
    f: f32,
    q: f32,
    // Integrator state
    band: f32,
    low: f32,
}

impl SvFilter {
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = Self {
            sample_rate,
            cutoff_hz: 1_000.0,
            resonance: 0.5,
            filter_type: FilterType::LowPass,
            f: 0.0,
            q: 0.0,
            band: 0.0,
            low: 0.0,
        };
        filter.update_coefficients();
        filter
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
        self.update_coefficients();
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.0, 0.99);
        self.update_coefficients();
    }

    pub fn set_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    fn update_coefficients(&mut self) {
        self.f = 2.0 * (PI * self.cutoff_hz / self.sample_rate).sin();
        self.q = 1.0 - self.resonance;
    }

    /// Run one sample through the recurrence and persist the registers.
    pub fn tick(&mut self, input: f32) -> FilterOutputs {
        let low = self.low + self.f * self.band;
        let high = input - low - self.q * self.band;
        let band = self.f * high + self.band;
        let notch = high + low;

        self.band = band;
        self.low = low;

        FilterOutputs {
            lowpass: low,
            highpass: high,
            bandpass: band,
            notch,
        }
    }

    /// Process one sample and return the tap selected by the current type.
    pub fn process(&mut self, input: f32) -> f32 {
        let outputs = self.tick(input);
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::BandPass => outputs.bandpass,
        }
    }

    pub fn reset(&mut self) {
        self.band = 0.0;
        self.low = 0.0;
    }
}
