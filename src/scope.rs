use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// Lock-free single-producer/single-consumer ring for handing recent audio
/// to a visualization consumer.
///
/// The audio thread appends blocks with [`write`](Self::write); a UI thread
/// pulls the most recent window with [`snapshot_into`](Self::snapshot_into).
/// The write cursor is the only synchronization point: the producer publishes
/// it with a Release store after the samples land, the consumer observes it
/// with an Acquire load. Samples themselves are plain `f32` bit patterns in
/// relaxed atomic cells, so a snapshot racing a concurrent write may mix old
/// and new samples within its window. For a scope display that is an accepted
/// tolerance; there is no transactional requirement on visual samples.
pub struct ScopeBuffer {
    samples: Box<[AtomicU32]>,
    write_index: AtomicUsize,
    /// Independent cursor for a draining consumer; snapshots never touch it.
    read_index: AtomicUsize,
}

pub const DEFAULT_SCOPE_CAPACITY: usize = 4096;

impl ScopeBuffer {
    pub fn new(capacity: usize) -> Self {
        let samples = (0..capacity.max(1))
            .map(|_| AtomicU32::new(0.0f32.to_bits()))
            .collect();
        Self {
            samples,
            write_index: AtomicUsize::new(0),
            read_index: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Append samples, advancing the cursor modulo capacity, then publish the
    /// new cursor. Producer side only; wait-free.
    pub fn write(&self, data: &[f32]) {
        let capacity = self.capacity();
        let mut cursor = self.write_index.load(Ordering::Relaxed);
        for &sample in data {
            self.samples[cursor].store(sample.to_bits(), Ordering::Relaxed);
            cursor = (cursor + 1) % capacity;
        }
        self.write_index.store(cursor, Ordering::Release);
    }

    /// Copy the most recent `count` samples into `out` in chronological
    /// order, oldest first. `count` clamps to capacity. The read cursor is
    /// untouched, so repeated snapshots are independent.
    pub fn snapshot_into(&self, out: &mut Vec<f32>, count: usize) {
        let capacity = self.capacity();
        let count = count.min(capacity);
        let cursor = self.write_index.load(Ordering::Acquire);

        out.clear();
        out.reserve(count);

        // The window of `count` samples ending at the cursor, wrapped.
        let start = (cursor + capacity - count) % capacity;
        for i in 0..count {
            let bits = self.samples[(start + i) % capacity].load(Ordering::Relaxed);
            out.push(f32::from_bits(bits));
        }
    }

    /// Convenience allocation for non-realtime callers.
    pub fn snapshot(&self, count: usize) -> Vec<f32> {
        let mut out = Vec::new();
        self.snapshot_into(&mut out, count);
        out
    }

    /// Samples written since the draining cursor last advanced.
    pub fn available(&self) -> usize {
        let capacity = self.capacity();
        let write = self.write_index.load(Ordering::Acquire);
        let read = self.read_index.load(Ordering::Relaxed);
        (write + capacity - read) % capacity
    }

    /// Drain samples in write order into `out`, advancing the read cursor.
    /// Returns how many samples were copied. Unlike snapshots, this consumes;
    /// it suits consumers that must see every block once, at the same torn-
    /// window tolerance as [`snapshot_into`](Self::snapshot_into).
    pub fn read_into(&self, out: &mut [f32]) -> usize {
        let capacity = self.capacity();
        let count = self.available().min(out.len());
        let read = self.read_index.load(Ordering::Relaxed);

        for (i, slot) in out[..count].iter_mut().enumerate() {
            let bits = self.samples[(read + i) % capacity].load(Ordering::Relaxed);
            *slot = f32::from_bits(bits);
        }

        self.read_index
            .store((read + count) % capacity, Ordering::Relaxed);
        count
    }
}

impl Default for ScopeBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SCOPE_CAPACITY)
    }
}
