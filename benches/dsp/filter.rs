//! Benchmarks for the state-variable filter.

use std::hint::black_box;

use auricle_dsp::dsp::filter::{FilterType, SvFilter};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 * 0.1).sin() * 0.5)
            .collect();
        let mut output = vec![0.0f32; size];

        for (name, filter_type) in [
            ("lowpass", FilterType::LowPass),
            ("highpass", FilterType::HighPass),
            ("bandpass", FilterType::BandPass),
        ] {
            let mut filter = SvFilter::new(44_100.0);
            filter.set_cutoff(1_000.0);
            filter.set_resonance(0.5);
            filter.set_type(filter_type);

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (out, &sample) in output.iter_mut().zip(&input) {
                        *out = filter.process(sample);
                    }
                    black_box(&mut output);
                })
            });
        }
    }

    group.finish();
}
