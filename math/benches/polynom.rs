// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glacier_math::{
    fields::f128::BaseElement, get_power_series, MultivariatePolynomial, Polynomial, StarkField,
};
use rand_utils::rand_vector;

const SIZES: [usize; 3] = [64, 128, 256];

fn interpolate(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate_domain");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    for &size in SIZES.iter() {
        let omicron = BaseElement::get_root_of_unity(size.ilog2());
        let domain = get_power_series(omicron, size);
        let values: Vec<BaseElement> = rand_vector(size);
        group.bench_function(BenchmarkId::new("lagrange", size), |bench| {
            bench.iter(|| Polynomial::interpolate_domain(&domain, &values))
        });
    }

    group.finish();
}

fn exact_div(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_div");
    group.sample_size(10);

    for &size in SIZES.iter() {
        let omicron = BaseElement::get_root_of_unity(size.ilog2());
        let zerofier = Polynomial::zerofier_domain(&get_power_series(omicron, size / 2));
        let numerator = &Polynomial::new(rand_vector(size)) * &zerofier;
        group.bench_function(BenchmarkId::new("zerofier", size), |bench| {
            bench.iter(|| numerator.exact_div(&zerofier))
        });
    }

    group.finish();
}

fn evaluate_symbolic(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_symbolic");
    group.sample_size(10);

    // next_0 - cur_0^2 - cur_1 over 1 + 2 * 2 variables
    let vars = MultivariatePolynomial::<BaseElement>::variables(5);
    let constraint = &(&vars[3] - &vars[1].pow(2)) - &vars[2];

    for &size in SIZES.iter() {
        let point: Vec<Polynomial<BaseElement>> =
            std::iter::once(Polynomial::x()).chain((0..4).map(|_| Polynomial::new(rand_vector(size)))).collect();
        group.bench_function(BenchmarkId::new("quadratic", size), |bench| {
            bench.iter(|| constraint.evaluate_symbolic(&point))
        });
    }

    group.finish();
}

criterion_group!(polynom_group, interpolate, exact_div, evaluate_symbolic);
criterion_main!(polynom_group);
