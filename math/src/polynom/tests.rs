// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use proptest::prelude::*;
use rand_utils::{prng_vector, rand_vector};

use super::{
    add, degree_of, div_rem, eval, get_zero_roots, interpolate, mul, remove_leading_zeros, sub,
    syn_div, Polynomial,
};
use crate::{
    field::{f128::BaseElement, FieldElement, StarkField},
    utils::get_power_series,
    MathError,
};

// SLICE FUNCTIONS
// ================================================================================================

#[test]
fn eval_horner() {
    let x = BaseElement::from(11269864713250585702u64);
    let poly: [BaseElement; 4] = [
        BaseElement::from(384863712573444386u64),
        BaseElement::from(7682273369345308472u64),
        BaseElement::from(13294661765012277990u64),
        BaseElement::from(16234810094004944758u64),
    ];

    // naive evaluation
    let expected = poly[0] + poly[1] * x + poly[2] * x.square() + poly[3] * x.cube();

    assert_eq!(BaseElement::ZERO, eval(&[], x));
    assert_eq!(poly[0], eval(&poly[..1], x));
    assert_eq!(expected, eval(&poly, x));
}

#[test]
fn add_and_sub_uneven_lengths() {
    let a = [BaseElement::new(1), BaseElement::new(2), BaseElement::new(3)];
    let b = [BaseElement::new(5)];

    let expected = vec![BaseElement::new(6), BaseElement::new(2), BaseElement::new(3)];
    assert_eq!(expected, add(&a, &b));
    assert_eq!(expected, add(&b, &a));

    let expected = vec![-BaseElement::new(4), -BaseElement::new(2), -BaseElement::new(3)];
    assert_eq!(expected, sub(&b, &a));
}

#[test]
fn mul_small() {
    // (x + 1) * (x - 1) = x^2 - 1
    let a = [BaseElement::ONE, BaseElement::ONE];
    let b = [-BaseElement::ONE, BaseElement::ONE];
    assert_eq!(vec![-BaseElement::ONE, BaseElement::ZERO, BaseElement::ONE], mul(&a, &b));
    assert!(mul(&a, &[]).is_empty());
}

#[test]
fn div_rem_small() {
    // x^3 + 2 = (x^2 + x + 1) * (x - 1) + 3
    let a = [BaseElement::new(2), BaseElement::ZERO, BaseElement::ZERO, BaseElement::ONE];
    let b = [-BaseElement::ONE, BaseElement::ONE];

    let (quotient, remainder) = div_rem(&a, &b).unwrap();
    assert_eq!(vec![BaseElement::ONE; 3], quotient);
    assert_eq!(vec![BaseElement::new(3)], remainder);

    // numerator of smaller degree is returned as the remainder
    let (quotient, remainder) = div_rem(&b, &a).unwrap();
    assert!(quotient.is_empty());
    assert_eq!(b.to_vec(), remainder);

    assert_eq!(Err(MathError::DivisionByZero), div_rem(&a, &[BaseElement::ZERO]));
}

#[test]
fn syn_div_matches_div_rem() {
    let poly: Vec<BaseElement> = rand_vector(16);
    let root = BaseElement::new(7);

    let expected = div_rem(&poly, &[-root, BaseElement::ONE]).unwrap().0;
    assert_eq!(expected, remove_leading_zeros(&syn_div(&poly, root)));
}

#[test]
fn zero_roots() {
    let xs: Vec<BaseElement> = rand_vector(12);
    let roots = get_zero_roots(&xs);

    assert_eq!(Some(12), degree_of(&roots));
    assert_eq!(BaseElement::ONE, roots[12]);
    for &x in xs.iter() {
        assert_eq!(BaseElement::ZERO, eval(&roots, x));
    }

    assert_eq!(vec![BaseElement::ONE], get_zero_roots::<BaseElement>(&[]));
}

#[test]
fn interpolate_random() {
    let xs: Vec<BaseElement> = prng_vector([1; 32], 16);
    let ys: Vec<BaseElement> = prng_vector([2; 32], 16);

    let poly = interpolate(&xs, &ys, false).unwrap();
    assert_eq!(16, poly.len());
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        assert_eq!(y, eval(&poly, x));
    }
}

#[test]
fn interpolate_lagrange_basis() {
    // the interpolant of a single ONE over n points is a Lagrange basis polynomial: it has
    // degree n - 1 and vanishes only on the other points of the domain
    let n = 8;
    let omicron = BaseElement::get_root_of_unity(3);
    let domain = get_power_series(omicron, n);
    let mut values = vec![BaseElement::ZERO; n];
    values[n - 1] = BaseElement::ONE;

    let poly = Polynomial::interpolate_domain(&domain, &values).unwrap();
    assert_eq!(Some(n - 1), poly.degree());
    for (&x, &y) in domain.iter().zip(values.iter()) {
        assert_eq!(y, poly.evaluate(x));
    }
    assert_ne!(BaseElement::ZERO, poly.evaluate(BaseElement::GENERATOR));
    assert_ne!(BaseElement::ZERO, poly.evaluate(BaseElement::GENERATOR * omicron));
}

#[test]
fn interpolate_errors() {
    let xs = [BaseElement::new(1), BaseElement::new(2), BaseElement::new(1)];
    let ys = [BaseElement::new(4), BaseElement::new(5), BaseElement::new(6)];

    assert_eq!(Err(MathError::MismatchedLengths(3, 2)), interpolate(&xs, &ys[..2], true));
    assert_eq!(Err(MathError::DuplicateDomainPoint), interpolate(&xs, &ys, true));
    assert_eq!(Ok(Vec::new()), interpolate::<BaseElement>(&[], &[], true));
}

#[test]
fn degree_of_trailing_zeros() {
    assert_eq!(None, degree_of::<BaseElement>(&[]));
    assert_eq!(None, degree_of(&[BaseElement::ZERO, BaseElement::ZERO]));
    assert_eq!(Some(0), degree_of(&[BaseElement::new(3), BaseElement::ZERO]));
    assert_eq!(Some(2), degree_of(&[BaseElement::ZERO, BaseElement::ZERO, BaseElement::ONE]));
}

// POLYNOMIAL TYPE
// ================================================================================================

#[test]
fn polynomial_is_trimmed() {
    let p = Polynomial::new(vec![BaseElement::new(1), BaseElement::ZERO, BaseElement::ZERO]);
    assert_eq!(Some(0), p.degree());
    assert_eq!(Polynomial::constant(BaseElement::ONE), p);

    let zero = Polynomial::new(vec![BaseElement::ZERO; 4]);
    assert!(zero.is_zero());
    assert_eq!(None, zero.degree());
    assert_eq!(BaseElement::ZERO, zero.leading_coefficient());
    assert_eq!(Polynomial::zero(), zero);

    let x = Polynomial::<BaseElement>::x();
    assert_eq!(Some(1), x.degree());
    assert_eq!(&x - &x, Polynomial::zero());
}

#[test]
fn exact_division() {
    let a = Polynomial::new(rand_vector::<BaseElement>(9));
    let b = Polynomial::new(rand_vector::<BaseElement>(5));
    let product = &a * &b;

    assert_eq!(Ok(a.clone()), product.exact_div(&b));

    // adding a constant leaves a remainder of degree 0
    let shifted = &product + &Polynomial::constant(BaseElement::ONE);
    assert_eq!(Err(MathError::ExactDivisionFailure(0)), shifted.exact_div(&b));
    assert_eq!(Err(MathError::DivisionByZero), product.exact_div(&Polynomial::zero()));
}

#[test]
fn zerofier_domain() {
    let omega = BaseElement::get_root_of_unity(4);
    let domain = get_power_series(omega, 16);

    let zerofier = Polynomial::zerofier_domain(&domain);
    assert_eq!(Some(16), zerofier.degree());
    assert!(zerofier.evaluate_domain(&domain).iter().all(|&v| v == BaseElement::ZERO));

    // over the full subgroup the zerofier is x^16 - 1
    let expected = &Polynomial::monomial(16, BaseElement::ONE) - &Polynomial::constant(BaseElement::ONE);
    assert_eq!(expected, zerofier);

    // any point outside the domain is not a root
    assert_ne!(BaseElement::ZERO, zerofier.evaluate(BaseElement::GENERATOR));
}

#[test]
fn scale_compose_and_pow() {
    let p = Polynomial::new(rand_vector::<BaseElement>(6));
    let factor = BaseElement::new(5);
    let x: BaseElement = rand_utils::rand_value();

    assert_eq!(p.evaluate(factor * x), p.scale(factor).evaluate(x));

    let q = Polynomial::new(rand_vector::<BaseElement>(3));
    assert_eq!(p.evaluate(q.evaluate(x)), p.compose(&q).evaluate(x));

    assert_eq!(Polynomial::constant(BaseElement::ONE), p.pow(0));
    assert_eq!(&(&p * &p) * &p, p.pow(3));
    assert_eq!(p.evaluate(x).exp(5), p.pow(5).evaluate(x));
}

#[test]
fn colinearity() {
    // points on y = 3x + 2
    let line = |x: u64| (BaseElement::from(x), BaseElement::from(3 * x + 2));
    assert!(Polynomial::test_colinearity(&[line(1), line(5), line(9)]));

    let mut off_line = line(9);
    off_line.1 += BaseElement::ONE;
    assert!(!Polynomial::test_colinearity(&[line(1), line(5), off_line]));

    // repeated x coordinates
    assert!(!Polynomial::test_colinearity(&[line(1), line(1), line(9)]));
}

// RANDOMIZED TESTS
// ================================================================================================

proptest! {
    #[test]
    fn distributivity(
        a in prop::collection::vec(any::<u128>(), 0..12),
        b in prop::collection::vec(any::<u128>(), 0..12),
        c in prop::collection::vec(any::<u128>(), 0..12),
    ) {
        let a = to_poly(a);
        let b = to_poly(b);
        let c = to_poly(c);

        let left = &a * &(&b + &c);
        let right = &(&a * &b) + &(&a * &c);
        prop_assert_eq!(left, right);
    }

    #[test]
    fn division_identity(
        a in prop::collection::vec(any::<u128>(), 0..24),
        b in prop::collection::vec(any::<u128>(), 1..12),
    ) {
        let a = to_poly(a);
        let b = to_poly(b);
        prop_assume!(!b.is_zero());

        let (quotient, remainder) = a.divide(&b).unwrap();
        prop_assert!(remainder.degree() < b.degree());
        prop_assert_eq!(a, &(&quotient * &b) + &remainder);
    }

    #[test]
    fn interpolation_recovers_polynomial(coefficients in prop::collection::vec(any::<u128>(), 1..16)) {
        let p = to_poly(coefficients);
        let domain = get_power_series(BaseElement::GENERATOR, 16);
        let values = p.evaluate_domain(&domain);

        prop_assert_eq!(p, Polynomial::interpolate_domain(&domain, &values).unwrap());
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn to_poly(values: Vec<u128>) -> Polynomial<BaseElement> {
    Polynomial::new(values.into_iter().map(BaseElement::from).collect())
}
