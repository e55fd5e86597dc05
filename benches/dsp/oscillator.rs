//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use auricle_dsp::dsp::oscillator::{Oscillator, Waveform};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - transcendental per sample
        let mut osc = Oscillator::new(44_100.0);
        osc.set_frequency(440.0);
        osc.set_waveform(Waveform::Sine);
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = osc.next_sample();
                }
                black_box(&mut buffer);
            })
        });

        // Saw - ramp plus one PolyBLEP correction
        let mut osc = Oscillator::new(44_100.0);
        osc.set_frequency(440.0);
        osc.set_waveform(Waveform::Saw);
        group.bench_with_input(BenchmarkId::new("saw", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = osc.next_sample();
                }
                black_box(&mut buffer);
            })
        });

        // Square - two PolyBLEP corrections per sample
        let mut osc = Oscillator::new(44_100.0);
        osc.set_frequency(440.0);
        osc.set_waveform(Waveform::Square);
        group.bench_with_input(BenchmarkId::new("square", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = osc.next_sample();
                }
                black_box(&mut buffer);
            })
        });

        // Triangle - piecewise linear
        let mut osc = Oscillator::new(44_100.0);
        osc.set_frequency(440.0);
        osc.set_waveform(Waveform::Triangle);
        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = osc.next_sample();
                }
                black_box(&mut buffer);
            })
        });
    }

    group.finish();
}
