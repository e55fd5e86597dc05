use crate::dsp::buffer::DspBuffer;
use crate::dsp::oscillator::{Oscillator, Waveform};
use crate::graph::node::{DspNode, NoteEvent, ParamChange};

/// Oscillator source node.
///
/// Renders one mono band-limited signal into channel 0 and duplicates it to
/// every remaining channel. Frequency comes from note events; the waveform is
/// routed through [`ParamChange::Waveform`].
pub struct OscillatorNode {
    osc: Oscillator,
}

impl OscillatorNode {
    pub fn new(waveform: Waveform) -> Self {
        let mut osc = Oscillator::new(44_100.0);
        osc.set_waveform(waveform);
        Self { osc }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Saw)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn waveform(&self) -> Waveform {
        self.osc.waveform()
    }
}

impl DspNode for OscillatorNode {
    fn prepare(&mut self, sample_rate: f32, _block_size: usize) {
        self.osc.set_sample_rate(sample_rate);
    }

    fn process(&mut self, buffer: &mut DspBuffer) {
        let mut channels = buffer.channels_mut();
        let Some(first) = channels.next() else {
            return;
        };
        for sample in first.iter_mut() {
            *sample = self.osc.next_sample();
        }
        // Mono source duplicated to the remaining channels.
        for other in channels {
            other.copy_from_slice(first);
        }
    }

    fn note_on(&mut self, event: &NoteEvent) {
        self.osc.set_frequency(event.frequency);
    }

    fn apply(&mut self, change: ParamChange) {
        if let ParamChange::Waveform(waveform) = change {
            self.osc.set_waveform(waveform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::HEADROOM;

    #[test]
    fn fills_all_channels_identically() {
        let mut node = OscillatorNode::sawtooth();
        node.prepare(48_000.0, 128);
        node.note_on(&NoteEvent::from_freq(440.0, 1.0));

        let mut buffer = DspBuffer::new(2, 128);
        node.process(&mut buffer);

        assert_eq!(buffer.channel(0), buffer.channel(1));
        assert!(buffer.channel(0).iter().any(|&s| s != 0.0));
    }

    #[test]
    fn output_respects_headroom() {
        let mut node = OscillatorNode::square();
        node.prepare(48_000.0, 256);
        node.note_on(&NoteEvent::from_freq(1_000.0, 1.0));

        let mut buffer = DspBuffer::new(1, 256);
        for _ in 0..16 {
            node.process(&mut buffer);
            for &sample in buffer.channel(0) {
                assert!(sample.abs() <= HEADROOM + 1e-5);
            }
        }
    }

    #[test]
    fn waveform_param_change_is_applied() {
        let mut node = OscillatorNode::sine();
        node.apply(ParamChange::Waveform(Waveform::Square));
        assert_eq!(node.waveform(), Waveform::Square);

        // Unrelated changes are ignored.
        node.apply(ParamChange::FilterCutoff(500.0));
        assert_eq!(node.waveform(), Waveform::Square);
    }

    #[test]
    fn source_reports_inactive() {
        let node = OscillatorNode::sine();
        assert!(!node.is_active());
    }
}
