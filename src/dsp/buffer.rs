/// Planar multi-channel sample store.
///
/// Each channel occupies one contiguous region of a single backing vector,
/// so a node can take a whole channel as a slice. Resizing happens on
/// configuration changes only, never in the per-block path; the render loop
/// sees a fixed-size buffer it clears and fills in place.
pub struct DspBuffer {
    channels: usize,
    frames: usize,
    data: Vec<f32>,
}

impl DspBuffer {
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            channels,
            frames,
            data: vec![0.0; channels * frames],
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Reallocate for a new channel/frame layout. A no-op when the layout is
    /// unchanged. Contents are zeroed on change; channel ordering is
    /// invariant, channel `c` always owns the `c`-th region.
    pub fn resize(&mut self, channels: usize, frames: usize) {
        if self.channels == channels && self.frames == frames {
            return;
        }
        self.channels = channels;
        self.frames = frames;
        self.data.clear();
        self.data.resize(channels * frames, 0.0);
    }

    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    pub fn channel(&self, channel: usize) -> &[f32] {
        assert!(channel < self.channels, "channel {channel} out of range");
        &self.data[channel * self.frames..][..self.frames]
    }

    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        assert!(channel < self.channels, "channel {channel} out of range");
        &mut self.data[channel * self.frames..][..self.frames]
    }

    /// Iterate all channels as disjoint mutable slices.
    pub fn channels_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        self.data.chunks_exact_mut(self.frames.max(1))
    }

    /// Accumulate `source` into this buffer sample by sample, over the
    /// channels and frames both buffers have.
    pub fn add(&mut self, source: &DspBuffer) {
        let channels = self.channels.min(source.channels);
        for c in 0..channels {
            let frames = self.frames.min(source.frames);
            let src = &source.channel(c)[..frames];
            let dst = &mut self.channel_mut(c)[..frames];
            for (d, s) in dst.iter_mut().zip(src) {
                *d += s;
            }
        }
    }

    pub fn copy_from(&mut self, source: &DspBuffer) {
        self.resize(source.channels, source.frames);
        self.data.copy_from_slice(&source.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_are_disjoint_regions() {
        let mut buffer = DspBuffer::new(2, 4);
        buffer.channel_mut(0).fill(1.0);
        buffer.channel_mut(1).fill(2.0);

        assert_eq!(buffer.channel(0), &[1.0; 4]);
        assert_eq!(buffer.channel(1), &[2.0; 4]);
    }

    #[test]
    fn resize_is_noop_for_same_layout() {
        let mut buffer = DspBuffer::new(2, 8);
        buffer.channel_mut(0)[3] = 0.5;
        buffer.resize(2, 8);
        assert_eq!(buffer.channel(0)[3], 0.5);
    }

    #[test]
    fn resize_changes_layout_and_zeroes() {
        let mut buffer = DspBuffer::new(1, 4);
        buffer.channel_mut(0).fill(1.0);
        buffer.resize(2, 16);

        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.frames(), 16);
        assert!(buffer.channel(0).iter().all(|&s| s == 0.0));
        assert!(buffer.channel(1).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn add_accumulates_over_shared_dimensions() {
        let mut out = DspBuffer::new(2, 4);
        out.channel_mut(0).fill(0.25);

        let mut source = DspBuffer::new(1, 2);
        source.channel_mut(0).fill(0.5);

        out.add(&source);
        assert_eq!(out.channel(0), &[0.75, 0.75, 0.25, 0.25]);
        assert!(out.channel(1).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn channels_mut_visits_every_channel_once() {
        let mut buffer = DspBuffer::new(3, 2);
        for (i, channel) in buffer.channels_mut().enumerate() {
            channel.fill(i as f32);
        }
        assert_eq!(buffer.channel(2), &[2.0, 2.0]);
    }
}
