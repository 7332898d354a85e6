// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use air::{transition::transition_variables, ConstraintError};
use crypto::{hashers::Blake3_256, ProofObject, ProofStream};
use math::{fields::f128::BaseElement, FieldElement, MathError, MultivariatePolynomial, Polynomial};
use rand_utils::seeded_rng;

use crate::{
    build_boundary_quotients, build_transition_quotients, get_opening_positions,
    BoundaryConstraint, ProverError, StarkContext, StarkOptions, StarkProver, TraceTable,
};

type Prover = StarkProver<BaseElement, Blake3_256>;

const TRACE_LENGTH: usize = 8;
const NUM_CHECKS: usize = 8;

// PROVER TESTS
// ================================================================================================

#[test]
fn prove_writes_expected_objects() {
    let context = build_context();
    let prover = Prover::new(context.clone());
    let trace = build_square_trace(TRACE_LENGTH);
    let boundary = build_boundary(&trace);

    let proof = prover
        .prove(trace, &build_constraints(), &boundary, &mut seeded_rng(1))
        .unwrap();
    let stream = ProofStream::<BaseElement, Blake3_256>::from_bytes(&proof).unwrap();

    let num_rounds = context.fri_options().num_rounds();
    let num_codewords = context.num_registers() + 1;
    let num_positions = 4 * NUM_CHECKS;
    let num_fri_objects = num_rounds + 1 + 4 * NUM_CHECKS * (num_rounds - 1);
    assert_eq!(num_codewords + num_fri_objects + 2 * num_codewords * num_positions, stream.len());

    // roots of boundary quotients and of the randomizer come first
    let objects = stream.objects();
    for object in objects[..num_codewords + num_rounds].iter() {
        assert!(matches!(object, ProofObject::Digest(_)));
    }
    assert!(matches!(objects[num_codewords + num_rounds], ProofObject::Codeword(_)));

    // openings alternate between leaf values and authentication paths
    let openings = &objects[objects.len() - 2 * num_codewords * num_positions..];
    for pair in openings.chunks(2) {
        assert!(matches!(pair[0], ProofObject::Element(_)));
        assert!(matches!(pair[1], ProofObject::Path(_)));
    }
}

#[test]
fn prove_is_deterministic_for_seeded_rng() {
    let prover = Prover::new(build_context());
    let trace = build_square_trace(TRACE_LENGTH);
    let boundary = build_boundary(&trace);
    let constraints = build_constraints();

    let proof1 = prover.prove(trace.clone(), &constraints, &boundary, &mut seeded_rng(7)).unwrap();
    let proof2 = prover.prove(trace.clone(), &constraints, &boundary, &mut seeded_rng(7)).unwrap();
    assert_eq!(proof1, proof2);

    let proof3 = prover.prove(trace, &constraints, &boundary, &mut seeded_rng(8)).unwrap();
    assert_ne!(proof1, proof3);
}

#[test]
fn prove_rejects_invalid_trace() {
    let prover = Prover::new(build_context());
    let trace = build_square_trace(TRACE_LENGTH);
    let boundary = build_boundary(&trace);
    let constraints = build_constraints();

    // a cell in the middle of the trace breaks transition constraints
    let mut invalid = trace.clone();
    invalid.set(1, 3, invalid.get(1, 3) + BaseElement::ONE);
    let result = prover.prove(invalid, &constraints, &boundary, &mut seeded_rng(1));
    assert!(matches!(
        result,
        Err(ProverError::UnsatisfiedTransitionConstraint(1, _))
            | Err(ProverError::ExactDivisionFailure(_))
    ));

    // the first cell is fixed by a boundary constraint
    let mut invalid = trace;
    invalid.set(0, 0, BaseElement::new(3));
    let result = prover.prove(invalid, &constraints, &boundary, &mut seeded_rng(1));
    assert!(matches!(
        result,
        Err(ProverError::UnsatisfiedBoundaryConstraint(0, 0))
            | Err(ProverError::ExactDivisionFailure(_))
    ));
}

#[test]
fn boundary_quotients_of_invalid_trace() {
    let context = build_context();
    let trace = build_square_trace(TRACE_LENGTH);
    let boundary = build_boundary(&trace);

    let quotients =
        build_boundary_quotients(&context, &interpolate_trace(&context, &trace), &boundary).unwrap();
    assert_eq!(2, quotients.len());

    // the first cell is fixed by a boundary constraint, so the first trace polynomial minus its
    // interpolant no longer vanishes at omicron^0
    let mut invalid = trace;
    invalid.set(0, 0, BaseElement::new(3));
    let result = build_boundary_quotients(&context, &interpolate_trace(&context, &invalid), &boundary);
    assert!(matches!(
        result,
        Err(ProverError::ExactDivisionFailure(MathError::ExactDivisionFailure(_)))
    ));
}

#[test]
fn transition_quotients_of_invalid_trace() {
    let context = build_context();
    let trace = build_square_trace(TRACE_LENGTH);
    let constraints = build_constraints();

    let quotients =
        build_transition_quotients(&context, &interpolate_trace(&context, &trace), &constraints)
            .unwrap();
    assert_eq!(2, quotients.len());

    // a cell in the middle of the trace is not constrained by the boundary, but breaks the
    // second transition constraint at cycles 2 and 3
    let mut invalid = trace;
    invalid.set(1, 3, invalid.get(1, 3) + BaseElement::ONE);
    let result =
        build_transition_quotients(&context, &interpolate_trace(&context, &invalid), &constraints);
    assert!(matches!(
        result,
        Err(ProverError::ExactDivisionFailure(MathError::ExactDivisionFailure(_)))
    ));
}

#[test]
fn prove_rejects_high_degree_constraints() {
    // with 32 random rows the trace polynomials have degree 63, and cubing them does not fit
    // into the trace domain of 128 points built for constraints of degree 2
    let options = StarkOptions::new(4, NUM_CHECKS, 16).unwrap();
    let context = StarkContext::new(options, 1, 32, 2).unwrap();
    let prover = Prover::new(context);

    let mut trace = TraceTable::new(1, 32);
    trace.fill(|state| state[0] = BaseElement::new(2), |_, state| state[0] = state[0].cube());
    let boundary = vec![
        BoundaryConstraint::new(0, 0, BaseElement::new(2)),
        BoundaryConstraint::new(31, 0, trace.get(0, 31)),
    ];
    let (_, current, next) = transition_variables::<BaseElement>(1);
    let constraints = vec![&next[0] - &(&(&current[0] * &current[0]) * &current[0])];

    assert_eq!(
        Err(ProverError::InvalidConstraints(ConstraintError::ConstraintDegreeTooHigh(255, 127))),
        prover.prove(trace, &constraints, &boundary, &mut seeded_rng(1))
    );
}

#[test]
fn prove_rejects_invalid_inputs() {
    let prover = Prover::new(build_context());
    let trace = build_square_trace(TRACE_LENGTH);
    let boundary = build_boundary(&trace);
    let constraints = build_constraints();

    let short_trace = build_square_trace(4);
    assert_eq!(
        Err(ProverError::TraceLengthMismatch(8, 4)),
        prover.prove(short_trace, &constraints, &boundary, &mut seeded_rng(1))
    );

    let wide_trace = TraceTable::new(3, TRACE_LENGTH);
    assert_eq!(
        Err(ProverError::TraceWidthMismatch(2, 3)),
        prover.prove(wide_trace, &constraints, &boundary, &mut seeded_rng(1))
    );

    assert_eq!(
        Err(ProverError::InvalidConstraints(ConstraintError::NoBoundaryConstraints)),
        prover.prove(trace.clone(), &constraints, &[], &mut seeded_rng(1))
    );
    assert_eq!(
        Err(ProverError::InvalidConstraints(ConstraintError::NoTransitionConstraints)),
        prover.prove(trace, &[], &boundary, &mut seeded_rng(1))
    );
}

#[test]
fn opening_positions() {
    let positions = get_opening_positions(&[1, 5], 4, 16);
    assert_eq!(vec![1, 1, 5, 5, 9, 9, 13, 13], positions);

    // shifted indices wrap around the domain
    let positions = get_opening_positions(&[6], 4, 16);
    assert_eq!(vec![2, 6, 10, 14], positions);
}

// HELPER FUNCTIONS
// ================================================================================================

/// Interpolates the columns of `trace` over the first `trace.length()` points of the trace
/// domain.
fn interpolate_trace(
    context: &StarkContext<BaseElement>,
    trace: &TraceTable<BaseElement>,
) -> Vec<Polynomial<BaseElement>> {
    trace.interpolate_columns(&context.trace_domain(trace.length())).unwrap()
}

pub fn build_context() -> StarkContext<BaseElement> {
    let options = StarkOptions::new(4, NUM_CHECKS, 16).unwrap();
    StarkContext::new(options, 2, TRACE_LENGTH, 2).unwrap()
}

/// Builds a trace in which the first register is squared at every step, and the second register
/// accumulates the values of the first one.
pub fn build_square_trace(length: usize) -> TraceTable<BaseElement> {
    let mut trace = TraceTable::new(2, length);
    trace.fill(
        |state| {
            state[0] = BaseElement::new(2);
            state[1] = BaseElement::ONE;
        },
        |_, state| {
            state[1] += state[0];
            state[0] = state[0].square();
        },
    );
    trace
}

/// Returns next[0] = current[0]^2 and next[1] = current[0] + current[1].
pub fn build_constraints() -> Vec<MultivariatePolynomial<BaseElement>> {
    let (_, current, next) = transition_variables::<BaseElement>(2);
    vec![
        &next[0] - &(&current[0] * &current[0]),
        &(&next[1] - &current[0]) - &current[1],
    ]
}

pub fn build_boundary(trace: &TraceTable<BaseElement>) -> Vec<BoundaryConstraint<BaseElement>> {
    let last_step = trace.length() - 1;
    vec![
        BoundaryConstraint::new(0, 0, BaseElement::new(2)),
        BoundaryConstraint::new(0, 1, BaseElement::ONE),
        BoundaryConstraint::new(last_step, 1, trace.get(1, last_step)),
    ]
}
