//! Benchmarks for polyphonic engine renders.
//!
//! These are the numbers that matter for the per-block deadline: a full
//! 8-voice pool rendering a stereo block, scope mirroring included.

use std::hint::black_box;

use auricle_dsp::dsp::buffer::DspBuffer;
use auricle_dsp::{EngineConfig, SynthEngine};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        for voices in [1usize, 4, 8] {
            let mut engine = SynthEngine::new(EngineConfig {
                block_size: size,
                ..EngineConfig::default()
            });
            // Long sustain keeps every voice active across iterations.
            engine.set_envelope(0.001, 0.01, 0.9, 0.5);
            for i in 0..voices {
                engine.note_on(48 + (i as u8 * 5), 100);
            }

            let mut output = DspBuffer::new(2, size);
            group.bench_with_input(
                BenchmarkId::new(format!("{voices}_voices"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        engine.render(black_box(&mut output));
                    })
                },
            );
        }
    }

    group.finish();
}
