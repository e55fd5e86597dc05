use crate::dsp::buffer::DspBuffer;
use crate::dsp::filter::{FilterType, SvFilter};
use crate::graph::node::{DspNode, ParamChange};

/// Filter node processing the buffer in place, one independent
/// [`SvFilter`] per channel so integrator state never bleeds across
/// channels.
///
/// The per-channel list grows when the buffer gains channels; new channels
/// inherit the node's current settings. Growth only happens on configuration
/// changes, the steady-state block path never allocates.
pub struct FilterNode {
    sample_rate: f32,
    cutoff_hz: f32,
    resonance: f32,
    filter_type: FilterType,
    channels: Vec<SvFilter>,
}

impl FilterNode {
    pub fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        Self {
            sample_rate: 44_100.0,
            cutoff_hz,
            resonance: 0.5,
            filter_type,
            channels: Vec::new(),
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff_hz)
    }

    fn configured_filter(&self) -> SvFilter {
        let mut filter = SvFilter::new(self.sample_rate);
        filter.set_cutoff(self.cutoff_hz);
        filter.set_resonance(self.resonance);
        filter.set_type(self.filter_type);
        filter
    }

    fn ensure_channels(&mut self, count: usize) {
        while self.channels.len() < count {
            self.channels.push(self.configured_filter());
        }
    }
}

impl DspNode for FilterNode {
    fn prepare(&mut self, sample_rate: f32, _block_size: usize) {
        self.sample_rate = sample_rate;
        for filter in &mut self.channels {
            filter.set_sample_rate(sample_rate);
        }
    }

    fn process(&mut self, buffer: &mut DspBuffer) {
        self.ensure_channels(buffer.channels());
        for (filter, channel) in self.channels.iter_mut().zip(buffer.channels_mut()) {
            for sample in channel {
                *sample = filter.process(*sample);
            }
        }
    }

    fn reset(&mut self) {
        for filter in &mut self.channels {
            filter.reset();
        }
    }

    fn apply(&mut self, change: ParamChange) {
        match change {
            ParamChange::FilterCutoff(hz) => {
                self.cutoff_hz = hz;
                for filter in &mut self.channels {
                    filter.set_cutoff(hz);
                }
            }
            ParamChange::FilterResonance(amount) => {
                self.resonance = amount.clamp(0.0, 0.99);
                for filter in &mut self.channels {
                    filter.set_resonance(amount);
                }
            }
            _ => {}
        }
    }
}
