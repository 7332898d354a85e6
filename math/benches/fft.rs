// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use glacier_math::{fft, fields::f128::BaseElement, StarkField};
use rand_utils::rand_vector;

const SIZES: [usize; 3] = [65_536, 131_072, 262_144];

fn fft_evaluate_poly(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft_evaluate_poly");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    let blowup_factor = 8;

    for &size in SIZES.iter() {
        let p: Vec<BaseElement> = rand_vector(size / blowup_factor);
        group.bench_function(BenchmarkId::new("on_coset", size), |bench| {
            bench.iter_with_large_drop(|| {
                fft::evaluate_poly_on_coset(&p, size, BaseElement::GENERATOR)
            });
        });
    }

    for &size in SIZES.iter() {
        let p: Vec<BaseElement> = rand_vector(size / blowup_factor);
        let twiddles = fft::get_twiddles::<BaseElement>(size / blowup_factor);
        group.bench_function(BenchmarkId::new("with_offset", size), |bench| {
            bench.iter_with_large_drop(|| {
                fft::evaluate_poly_with_offset(&p, &twiddles, BaseElement::GENERATOR, blowup_factor)
            });
        });
    }

    group.finish();
}

fn fft_interpolate_poly(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft_interpolate_poly");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    for &size in SIZES.iter() {
        let p: Vec<BaseElement> = rand_vector(size);
        let inv_twiddles = fft::get_inv_twiddles::<BaseElement>(size);
        group.bench_function(BenchmarkId::new("with_offset", size), |bench| {
            bench.iter_batched_ref(
                || p.clone(),
                |p| fft::interpolate_poly_with_offset(p, &inv_twiddles, BaseElement::GENERATOR),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(fft_group, fft_evaluate_poly, fft_interpolate_poly);
criterion_main!(fft_group);
