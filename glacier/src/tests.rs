// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use rand_utils::seeded_rng;

use super::*;
use crypto::hashers::{Blake3_256, Sha3_256};
use math::{fields::f128::BaseElement, FieldElement};
use transition::transition_variables;

type Fibonacci = Stark<BaseElement, Blake3_256>;

const TRACE_LENGTH: usize = 4;

// CONFIGURATION
// ================================================================================================

#[test]
fn derived_parameters() {
    let stark = build_stark();

    assert_eq!(2, stark.num_registers());
    assert_eq!(TRACE_LENGTH, stark.original_trace_length());
    assert_eq!(32, stark.num_randomizers());
    assert_eq!(36, stark.randomized_trace_length());
    assert_eq!(128, stark.omicron_domain_length());
    assert_eq!(512, stark.fri_domain_length());
    assert_eq!(stark.omicron(), stark.omega().exp(4u64.into()));
    assert_eq!(2, stark.context().transition_constraints_degree());

    let options = stark.options();
    assert_eq!(4, options.expansion_factor());
    assert_eq!(8, options.num_colinearity_checks());
    assert_eq!(16, options.security_level());
}

#[test]
fn invalid_configuration() {
    assert_eq!(
        Err(ConfigurationError::ExpansionFactorNotPowerOfTwo(3)),
        StarkOptions::new(3, 8, 16)
    );
    assert_eq!(
        Err(ConfigurationError::TooFewColinearityChecks(4, 16)),
        StarkOptions::new(4, 4, 16)
    );

    let options = StarkOptions::new(4, 8, 16).unwrap();
    assert_eq!(
        ConfigurationError::NoRegisters,
        Fibonacci::new(options, 0, TRACE_LENGTH, 2).unwrap_err()
    );
    assert_eq!(
        ConfigurationError::EmptyTrace,
        Fibonacci::new(options, 2, 0, 2).unwrap_err()
    );

    let options = StarkOptions::new(4, 100, 200).unwrap();
    assert_eq!(
        ConfigurationError::FieldTooSmall(128, 200),
        Fibonacci::new(options, 2, TRACE_LENGTH, 2).unwrap_err()
    );
}

// PROVE / VERIFY
// ================================================================================================

#[test]
fn prove_verify() {
    let stark = build_stark();
    let constraints = build_constraints();
    let boundary = build_boundary();

    let proof = stark
        .prove(build_trace(), &constraints, &boundary, &mut seeded_rng(1))
        .unwrap();
    assert!(stark.verify(&proof, &constraints, &boundary));

    // an independently constructed instance accepts the proof as well
    let options = StarkOptions::new(4, 8, 16).unwrap();
    let other = Fibonacci::with_default_degree(options, 2, TRACE_LENGTH).unwrap();
    assert!(other.verify(&proof, &constraints, &boundary));
}

#[test]
fn prove_verify_with_different_randomness() {
    let stark = build_stark();
    let constraints = build_constraints();
    let boundary = build_boundary();

    let proof1 = stark
        .prove(build_trace(), &constraints, &boundary, &mut seeded_rng(1))
        .unwrap();
    let proof2 = stark
        .prove(build_trace(), &constraints, &boundary, &mut seeded_rng(2))
        .unwrap();

    assert_ne!(proof1, proof2);
    assert!(stark.verify(&proof2, &constraints, &boundary));
}

#[test]
fn prove_verify_sha3() {
    let options = StarkOptions::new(4, 8, 16).unwrap();
    let stark = Stark::<BaseElement, Sha3_256>::new(options, 2, TRACE_LENGTH, 2).unwrap();
    let constraints = build_constraints();
    let boundary = build_boundary();

    let proof = stark
        .prove(build_trace(), &constraints, &boundary, &mut seeded_rng(5))
        .unwrap();
    assert!(stark.verify(&proof, &constraints, &boundary));

    // proofs are bound to the hash function
    assert!(!build_stark().verify(&proof, &constraints, &boundary));
}

#[test]
fn prove_invalid_trace() {
    let stark = build_stark();
    let constraints = build_constraints();
    let boundary = build_boundary();

    for step in 0..TRACE_LENGTH {
        for register in 0..2 {
            let mut trace = build_trace();
            trace.set(register, step, trace.get(register, step) + BaseElement::ONE);
            assert!(stark.prove(trace, &constraints, &boundary, &mut seeded_rng(1)).is_err());
        }
    }
}

#[test]
fn prove_constraints_of_undeclared_degree() {
    let options = StarkOptions::new(4, 8, 16).unwrap();
    let mut trace = TraceTable::new(1, 32);
    trace.fill(|state| state[0] = BaseElement::new(2), |_, state| state[0] = state[0].cube());
    let boundary = vec![
        BoundaryConstraint::new(0, 0, BaseElement::new(2)),
        BoundaryConstraint::new(31, 0, trace.get(0, 31)),
    ];
    let (_, current, next) = transition_variables::<BaseElement>(1);
    let constraints = vec![&next[0] - &(&(&current[0] * &current[0]) * &current[0])];

    // cubic constraints do not fit a STARK built for quadratic ones
    let stark = Stark::<BaseElement, Blake3_256>::new(options, 1, 32, 2).unwrap();
    assert_eq!(
        Err(ProverError::InvalidConstraints(ConstraintError::ConstraintDegreeTooHigh(255, 127))),
        stark.prove(trace.clone(), &constraints, &boundary, &mut seeded_rng(1))
    );

    // declaring the degree makes the trace domain large enough
    let stark = Stark::<BaseElement, Blake3_256>::new(options, 1, 32, 3).unwrap();
    let proof = stark.prove(trace, &constraints, &boundary, &mut seeded_rng(1)).unwrap();
    assert!(stark.verify(&proof, &constraints, &boundary));

    // and a STARK built for quadratic constraints rejects the proof
    let quadratic = Stark::<BaseElement, Blake3_256>::new(options, 1, 32, 2).unwrap();
    assert!(!quadratic.verify(&proof, &constraints, &boundary));
}

#[test]
fn boundary_implies_trace_length() {
    let stark = build_stark();
    let constraints = build_constraints();

    // fixing only the first row describes a trace of one cycle, not of TRACE_LENGTH cycles
    let boundary = vec![
        BoundaryConstraint::new(0, 0, BaseElement::ONE),
        BoundaryConstraint::new(0, 1, BaseElement::ONE),
    ];
    assert_eq!(
        Err(ProverError::InvalidConstraints(ConstraintError::TraceLengthMismatch(TRACE_LENGTH, 1))),
        stark.prove(build_trace(), &constraints, &boundary, &mut seeded_rng(1))
    );

    let proof = stark
        .prove(build_trace(), &constraints, &build_boundary(), &mut seeded_rng(1))
        .unwrap();
    assert!(!stark.verify(&proof, &constraints, &boundary));

    // a cycle which cannot be part of any trace is rejected without overflowing
    let boundary = vec![BoundaryConstraint::new(usize::MAX, 0, BaseElement::ONE)];
    assert!(!stark.verify(&proof, &constraints, &boundary));
}

#[test]
fn verify_wrong_output() {
    let stark = build_stark();
    let constraints = build_constraints();
    let boundary = build_boundary();

    let proof = stark
        .prove(build_trace(), &constraints, &boundary, &mut seeded_rng(1))
        .unwrap();

    let mut wrong_boundary = boundary.clone();
    wrong_boundary[2] = BoundaryConstraint::new(3, 1, BaseElement::new(8));
    assert!(!stark.verify(&proof, &constraints, &wrong_boundary));
}

#[test]
fn verify_truncated_proof() {
    let stark = build_stark();
    let constraints = build_constraints();
    let boundary = build_boundary();

    let proof = stark
        .prove(build_trace(), &constraints, &boundary, &mut seeded_rng(1))
        .unwrap();

    assert!(!stark.verify(&[], &constraints, &boundary));
    assert!(!stark.verify(&proof[..proof.len() / 2], &constraints, &boundary));
    assert!(!stark.verify(&proof[..proof.len() - 1], &constraints, &boundary));

    let mut extended = proof.clone();
    extended.push(0);
    assert!(!stark.verify(&extended, &constraints, &boundary));
}

#[test]
fn verify_flipped_bits() {
    let stark = build_stark();
    let constraints = build_constraints();
    let boundary = build_boundary();

    let proof = stark
        .prove(build_trace(), &constraints, &boundary, &mut seeded_rng(1))
        .unwrap();

    let positions = [0, 1, 17, proof.len() / 3, proof.len() / 2, proof.len() - 40, proof.len() - 1];
    for &position in positions.iter() {
        for bit in [0, 7] {
            let mut tampered = proof.clone();
            tampered[position] ^= 1 << bit;
            assert!(
                !stark.verify(&tampered, &constraints, &boundary),
                "flipping bit {bit} at position {position} was not detected"
            );
        }
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn build_stark() -> Fibonacci {
    let options = StarkOptions::new(4, 8, 16).unwrap();
    Fibonacci::new(options, 2, TRACE_LENGTH, 2).unwrap()
}

/// Fibonacci sequence over two registers: (a, b) -> (b, a + b), starting with (1, 1).
fn build_trace() -> TraceTable<BaseElement> {
    let mut trace = TraceTable::new(2, TRACE_LENGTH);
    trace.fill(
        |state| {
            state[0] = BaseElement::ONE;
            state[1] = BaseElement::ONE;
        },
        |_, state| {
            let next = state[0] + state[1];
            state[0] = state[1];
            state[1] = next;
        },
    );
    trace
}

fn build_constraints() -> Vec<MultivariatePolynomial<BaseElement>> {
    let (_, current, next) = transition_variables::<BaseElement>(2);
    vec![&next[0] - &current[1], &(&next[1] - &current[0]) - &current[1]]
}

fn build_boundary() -> Vec<BoundaryConstraint<BaseElement>> {
    vec![
        BoundaryConstraint::new(0, 0, BaseElement::ONE),
        BoundaryConstraint::new(0, 1, BaseElement::ONE),
        BoundaryConstraint::new(TRACE_LENGTH - 1, 1, BaseElement::new(5)),
    ]
}
