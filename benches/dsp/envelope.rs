//! Benchmarks for envelope level generation.

use std::hint::black_box;

use auricle_dsp::dsp::envelope::{Envelope, EnvelopeStage};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let mut env = Envelope::adsr(44_100.0, 0.01, 0.1, 0.7, 0.3);
        env.enter_stage(EnvelopeStage::Attack);

        group.bench_with_input(BenchmarkId::new("adsr", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = env.next_level();
                }
                black_box(&mut buffer);
            })
        });
    }

    group.finish();
}
