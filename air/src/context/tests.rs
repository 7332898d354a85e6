// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crypto::{hashers::Blake3_256, Hasher};
use proptest::prelude::*;
use math::{fields::f128::BaseElement, FieldElement, MathError, MultivariatePolynomial, StarkField};
use utils::{ByteWriter, Deserializable, DeserializationError, Serializable};

use super::{sample_weights, StarkContext};
use crate::{
    transition::transition_variables, BoundaryConstraint, ConfigurationError, ConstraintError,
    StarkOptions,
};

// OPTIONS
// ================================================================================================

#[test]
fn options_validation() {
    let options = StarkOptions::new(4, 8, 16).unwrap();
    assert_eq!(4, options.expansion_factor());
    assert_eq!(8, options.num_colinearity_checks());
    assert_eq!(16, options.security_level());
    assert_eq!(32, options.num_randomizers());

    assert_eq!(
        Err(ConfigurationError::ExpansionFactorNotPowerOfTwo(6)),
        StarkOptions::new(6, 8, 16)
    );
    assert_eq!(
        Err(ConfigurationError::ExpansionFactorTooSmall(2, 4)),
        StarkOptions::new(2, 8, 16)
    );
    assert_eq!(
        Err(ConfigurationError::TooFewColinearityChecks(7, 16)),
        StarkOptions::new(4, 7, 16)
    );
}

#[test]
fn options_serialization() {
    let options = StarkOptions::new(8, 64, 128).unwrap();
    let bytes = options.to_bytes();
    assert_eq!(options, StarkOptions::read_from_bytes(&bytes).unwrap());

    // expansion factor 3 is rejected on read
    let mut invalid = Vec::<u8>::new();
    invalid.write_usize(3);
    invalid.write_usize(8);
    invalid.write_usize(16);
    assert!(matches!(
        StarkOptions::read_from_bytes(&invalid),
        Err(DeserializationError::InvalidValue(_))
    ));
}

// CONTEXT CONSTRUCTION
// ================================================================================================

#[test]
fn context_parameters() {
    let context = build_context();

    assert_eq!(2, context.num_registers());
    assert_eq!(8, context.original_trace_length());
    assert_eq!(2, context.transition_constraints_degree());
    assert_eq!(32, context.num_randomizers());
    assert_eq!(40, context.randomized_trace_length());
    assert_eq!(128, context.omicron_domain_length());
    assert_eq!(512, context.fri_domain_length());
    assert_eq!(BaseElement::GENERATOR, context.generator());

    // omega and omicron are primitive roots of the expected orders
    assert_eq!(BaseElement::ONE, context.omega().exp(512));
    assert_ne!(BaseElement::ONE, context.omega().exp(256));
    assert_eq!(BaseElement::ONE, context.omicron().exp(128));
    assert_ne!(BaseElement::ONE, context.omicron().exp(64));

    let fri_domain = context.fri_domain();
    assert_eq!(512, fri_domain.len());
    assert_eq!(fri_domain[37], context.fri_domain_point(37));

    let fri_options = context.fri_options();
    assert_eq!(512, fri_options.domain_length());
    assert_eq!(fri_domain, fri_options.eval_domain());
}

#[test]
fn context_errors() {
    let options = StarkOptions::new(4, 8, 16).unwrap();
    assert_eq!(Err(ConfigurationError::NoRegisters), StarkContext::<BaseElement>::new(options, 0, 8, 2));
    assert_eq!(Err(ConfigurationError::EmptyTrace), StarkContext::<BaseElement>::new(options, 1, 0, 2));
    assert_eq!(
        Err(ConfigurationError::ConstraintDegreeTooSmall),
        StarkContext::<BaseElement>::new(options, 1, 8, 0)
    );

    let options = StarkOptions::new(4, 100, 200).unwrap();
    assert_eq!(
        Err(ConfigurationError::FieldTooSmall(128, 200)),
        StarkContext::<BaseElement>::new(options, 1, 8, 2)
    );
}

// CONSTRAINT VALIDATION
// ================================================================================================

#[test]
fn validate_transition_constraints() {
    let context = build_context();
    assert!(context.validate_transition_constraints(&build_constraints()).is_ok());

    assert_eq!(
        Err(ConstraintError::NoTransitionConstraints),
        context.validate_transition_constraints(&[])
    );

    let (_, current, _) = transition_variables::<BaseElement>(1);
    let mut constraints = build_constraints();
    constraints.push(current[0].clone());
    assert_eq!(
        Err(ConstraintError::InvalidNumberOfVariables(2, 5, 3)),
        context.validate_transition_constraints(&constraints)
    );
}

#[test]
fn validate_constraint_degree() {
    // 32 cycles and 32 random rows interpolate into polynomials of degree 63
    let options = StarkOptions::new(4, 8, 16).unwrap();
    let context = StarkContext::<BaseElement>::new(options, 1, 32, 2).unwrap();
    assert_eq!(128, context.omicron_domain_length());

    let (x, current, next) = transition_variables::<BaseElement>(1);
    let square = &current[0] * &current[0];
    let cube = &square * &current[0];

    // degree 2 * 63 - 31 quotients fit into the trace domain
    assert!(context.validate_transition_constraints(&[&next[0] - &square]).is_ok());
    assert!(context.validate_transition_constraints(&[&next[0] - &(&x * &square)]).is_ok());

    // degree 3 * 63 - 31 quotients do not
    assert_eq!(
        Err(ConstraintError::ConstraintDegreeTooHigh(255, 127)),
        context.validate_transition_constraints(&[&next[0] - &square, &next[0] - &cube])
    );

    // a context built for constraints of degree 3 accepts them
    let context = StarkContext::<BaseElement>::new(options, 1, 32, 3).unwrap();
    assert_eq!(256, context.omicron_domain_length());
    assert!(context.validate_transition_constraints(&[&next[0] - &cube]).is_ok());
}

#[test]
fn validate_boundary() {
    let context = build_context();
    assert!(context.validate_boundary(&build_boundary()).is_ok());

    assert_eq!(Err(ConstraintError::NoBoundaryConstraints), context.validate_boundary(&[]));

    let mut boundary = build_boundary();
    boundary.push(BoundaryConstraint::new(3, 2, BaseElement::ONE));
    assert_eq!(Err(ConstraintError::RegisterOutOfBounds(2, 2)), context.validate_boundary(&boundary));

    let mut boundary = build_boundary();
    boundary.push(BoundaryConstraint::new(7, 1, BaseElement::ZERO));
    assert_eq!(
        Err(ConstraintError::DuplicateBoundaryConstraint(7, 1)),
        context.validate_boundary(&boundary)
    );

    let boundary = vec![BoundaryConstraint::new(5, 0, BaseElement::ONE)];
    assert_eq!(Err(ConstraintError::TraceLengthMismatch(8, 6)), context.validate_boundary(&boundary));

    // the trace length is implied by the last constrained cycle, so a boundary which fixes only
    // the first row describes a trace of a single cycle
    let boundary = vec![
        BoundaryConstraint::new(0, 0, BaseElement::new(2)),
        BoundaryConstraint::new(0, 1, BaseElement::ONE),
    ];
    assert_eq!(Err(ConstraintError::TraceLengthMismatch(8, 1)), context.validate_boundary(&boundary));

    let boundary = vec![BoundaryConstraint::new(usize::MAX, 0, BaseElement::ONE)];
    assert_eq!(
        Err(ConstraintError::CycleOutOfBounds(usize::MAX)),
        context.validate_boundary(&boundary)
    );
}

// DEGREE BOOKKEEPING
// ================================================================================================

#[test]
fn transition_degrees() {
    let context = build_context();
    let constraints = build_constraints();

    // next[0] - current[0]^2 has degree 2 * 39; next[1] - current[0] - current[1] has degree 39
    assert_eq!(vec![78, 39], context.transition_degree_bounds(&constraints));
    assert_eq!(vec![71, 32], context.transition_quotient_degree_bounds(&constraints));
    assert_eq!(127, context.max_degree(&constraints));

    // the combination polynomial fits into the trace domain
    assert!(context.max_degree(&constraints) < context.omicron_domain_length());

    // constraints which vanish identically still yield a combination polynomial of degree 1
    let zero = MultivariatePolynomial::zero(5);
    assert_eq!(vec![0], context.transition_quotient_degree_bounds(&[zero.clone()]));
    assert_eq!(1, context.max_degree(&[zero]));
}

#[test]
fn transition_zerofier() {
    let context = build_context();
    let zerofier = context.transition_zerofier();
    assert_eq!(Some(7), zerofier.degree());

    let domain = context.trace_domain(8);
    for &x in domain[..7].iter() {
        assert_eq!(BaseElement::ZERO, zerofier.evaluate(x));
    }
    assert_ne!(BaseElement::ZERO, zerofier.evaluate(domain[7]));
}

#[test]
fn boundary_polynomials() {
    let context = build_context();
    let boundary = build_boundary();
    let omicron = context.omicron();

    let zerofiers = context.boundary_zerofiers(&boundary);
    assert_eq!(2, zerofiers.len());
    assert_eq!(Some(1), zerofiers[0].degree());
    assert_eq!(Some(2), zerofiers[1].degree());
    assert_eq!(BaseElement::ZERO, zerofiers[1].evaluate(omicron.exp(7)));

    let interpolants = context.boundary_interpolants(&boundary).unwrap();
    for constraint in boundary.iter() {
        let x = omicron.exp(constraint.cycle() as u128);
        assert_eq!(constraint.value(), interpolants[constraint.register()].evaluate(x));
    }

    assert_eq!(vec![38, 37], context.boundary_quotient_degree_bounds(40, &boundary));

    // a register constrained twice at the same cycle cannot be interpolated
    let mut boundary = build_boundary();
    boundary.push(BoundaryConstraint::new(7, 1, BaseElement::ZERO));
    assert_eq!(Err(MathError::DuplicateDomainPoint), context.boundary_interpolants(&boundary));
}

#[test]
fn weights() {
    let context = build_context();
    assert_eq!(9, context.num_weights(2));

    let seed = Blake3_256::hash(b"transcript");
    let weights = sample_weights::<BaseElement, Blake3_256>(9, seed);
    assert_eq!(9, weights.len());
    assert_eq!(weights, sample_weights::<BaseElement, Blake3_256>(9, seed));

    let other = sample_weights::<BaseElement, Blake3_256>(9, Blake3_256::hash(b"other"));
    assert_ne!(weights, other);
}

// RANDOMIZED TESTS
// ================================================================================================

proptest! {
    #[test]
    fn max_degree_covers_quotients(trace_length in 1usize..64, num_checks in 8usize..24) {
        let options = StarkOptions::new(4, num_checks, 16).unwrap();
        let context = StarkContext::<BaseElement>::new(options, 2, trace_length, 2).unwrap();
        let constraints = build_constraints();

        let max_degree = context.max_degree(&constraints);
        prop_assert!((max_degree + 1).is_power_of_two());
        prop_assert!(max_degree < context.omicron_domain_length());
        for bound in context.transition_quotient_degree_bounds(&constraints) {
            prop_assert!(bound <= max_degree);
        }
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn build_context() -> StarkContext<BaseElement> {
    let options = StarkOptions::new(4, 8, 16).unwrap();
    StarkContext::new(options, 2, 8, 2).unwrap()
}

/// Returns next[0] = current[0]^2 and next[1] = current[0] + current[1].
fn build_constraints() -> Vec<MultivariatePolynomial<BaseElement>> {
    let (_, current, next) = transition_variables::<BaseElement>(2);
    vec![
        &next[0] - &(&current[0] * &current[0]),
        &(&next[1] - &current[0]) - &current[1],
    ]
}

fn build_boundary() -> Vec<BoundaryConstraint<BaseElement>> {
    vec![
        BoundaryConstraint::new(0, 0, BaseElement::new(2)),
        BoundaryConstraint::new(0, 1, BaseElement::ONE),
        BoundaryConstraint::new(7, 1, BaseElement::new(5)),
    ]
}
