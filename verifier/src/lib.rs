// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains Glacier STARK verifier.
//!
//! The verifier checks proofs generated by the Glacier STARK prover. A verifier instantiated
//! with the same [StarkContext] as the prover, and given the same transition and boundary
//! constraints, accepts a proof if and only if all checks described below pass:
//!
//! 1. Openings of the boundary quotient codewords and of the randomizer codeword match their
//!    commitments.
//! 2. The combination codeword passes the FRI low-degree test.
//! 3. At every queried position, the combination of quotients reconstructed from the openings
//!    matches the value attested to by FRI.
//!
//! The verifier never reports why a proof was rejected; the reason is only emitted as a debug
//! event via [tracing](https://docs.rs/tracing).

use core::marker::PhantomData;
use std::collections::BTreeMap;

pub use air::{BoundaryConstraint, StarkContext, StarkOptions};
use air::{sample_weights, transition::evaluate_transition_constraints};
pub use crypto;
use crypto::{Hasher, ProofStream, ProofStreamError};
use fri::FriVerifier;
pub use math;
use math::{FieldElement, MultivariatePolynomial, StarkField};
use tracing::{event, instrument, Level};

mod errors;
use errors::VerifierError;


// STARK VERIFIER
// ================================================================================================
/// Verifies STARK proofs for execution traces of a specific shape.
///
/// All parameters of the protocol are defined by the [StarkContext] the verifier is
/// instantiated with. `H` is the hash function used for Merkle commitments and Fiat-Shamir
/// challenges; it must be the same as the one used by the prover.
#[derive(Debug, Clone)]
pub struct StarkVerifier<E: StarkField, H: Hasher> {
    context: StarkContext<E>,
    _hasher: PhantomData<H>,
}

impl<E: StarkField, H: Hasher> StarkVerifier<E, H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns a new verifier for the specified context.
    pub fn new(context: StarkContext<E>) -> Self {
        StarkVerifier { context, _hasher: PhantomData }
    }

    // ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the context this verifier was instantiated with.
    pub fn context(&self) -> &StarkContext<E> {
        &self.context
    }

    // VERIFIER
    // --------------------------------------------------------------------------------------------

    /// Returns true if `proof` attests that some execution trace satisfies
    /// `transition_constraints` and `boundary`.
    ///
    /// Returns false if the proof is malformed or truncated, if any of the checks fails, or if
    /// the constraints do not fit the context of this verifier.
    #[instrument(skip_all, fields(proof_size = proof.len()))]
    pub fn verify(
        &self,
        proof: &[u8],
        transition_constraints: &[MultivariatePolynomial<E>],
        boundary: &[BoundaryConstraint<E>],
    ) -> bool {
        match self.verify_proof(proof, transition_constraints, boundary) {
            Ok(()) => true,
            Err(err) => {
                event!(Level::DEBUG, "STARK proof rejected: {}", err);
                false
            },
        }
    }

    // HELPER METHODS
    // --------------------------------------------------------------------------------------------

    fn verify_proof(
        &self,
        proof: &[u8],
        transition_constraints: &[MultivariatePolynomial<E>],
        boundary: &[BoundaryConstraint<E>],
    ) -> Result<(), VerifierError> {
        let context = &self.context;
        context.validate_transition_constraints(transition_constraints)?;
        context.validate_boundary(boundary)?;

        let mut stream =
            ProofStream::<E, H>::from_bytes(proof).map_err(ProofStreamError::Deserialization)?;

        // 1 ----- read commitments and derive weights --------------------------------------------
        let boundary_quotient_roots = (0..context.num_registers())
            .map(|_| stream.pull_digest())
            .collect::<Result<Vec<_>, _>>()?;
        let randomizer_root = stream.pull_digest()?;

        let weights = sample_weights::<E, H>(
            context.num_weights(transition_constraints.len()),
            stream.verifier_fiat_shamir(),
        );

        // 2 ----- verify low-degree proof --------------------------------------------------------
        let fri_verifier = FriVerifier::<E, H>::new(context.fri_options());
        let mut polynomial_values = Vec::new();
        if !fri_verifier.verify(&mut stream, &mut polynomial_values) {
            return Err(VerifierError::LowDegreeTestFailed);
        }
        polynomial_values.sort_by_key(|&(index, _)| index);

        // 3 ----- read openings of committed codewords -------------------------------------------
        let expansion_factor = context.expansion_factor();
        let domain_length = context.fri_domain_length();
        let mut positions: Vec<usize> = polynomial_values.iter().map(|&(index, _)| index).collect();
        positions.extend(
            polynomial_values
                .iter()
                .map(|&(index, _)| (index + expansion_factor) % domain_length),
        );
        positions.sort_unstable();

        let mut boundary_quotient_leaves = Vec::with_capacity(boundary_quotient_roots.len());
        for (register, &root) in boundary_quotient_roots.iter().enumerate() {
            boundary_quotient_leaves.push(read_openings(&mut stream, register, root, &positions)?);
        }
        let randomizer_leaves =
            read_openings(&mut stream, context.num_registers(), randomizer_root, &positions)?;

        if stream.read_index() != stream.len() {
            return Err(VerifierError::UnconsumedProofObjects(stream.len() - stream.read_index()));
        }

        // 4 ----- check the combination at every queried position --------------------------------
        let boundary_zerofiers = context.boundary_zerofiers(boundary);
        let boundary_interpolants = context.boundary_interpolants(boundary)?;
        let transition_zerofier = context.transition_zerofier();
        let max_degree = context.max_degree(transition_constraints);
        let transition_bounds = context.transition_quotient_degree_bounds(transition_constraints);
        let boundary_bounds =
            context.boundary_quotient_degree_bounds(context.randomized_trace_length(), boundary);

        // reconstructs values of trace polynomials at the specified position from openings of
        // boundary quotients
        let trace_values = |index: usize, x: E| -> Vec<E> {
            boundary_quotient_leaves
                .iter()
                .zip(boundary_zerofiers.iter().zip(boundary_interpolants.iter()))
                .map(|(leaves, (zerofier, interpolant))| {
                    leaves[&index] * zerofier.evaluate(x) + interpolant.evaluate(x)
                })
                .collect()
        };

        for &(index, value) in polynomial_values.iter() {
            let x = context.fri_domain_point(index);
            let next_index = (index + expansion_factor) % domain_length;
            let current = trace_values(index, x);
            let next = trace_values(next_index, context.fri_domain_point(next_index));

            let transition_values =
                evaluate_transition_constraints(transition_constraints, x, &current, &next)?;
            let zerofier_inv = transition_zerofier.evaluate(x).try_inv()?;

            let mut terms = Vec::with_capacity(weights.len());
            terms.push(randomizer_leaves[&index]);
            for (&transition_value, &bound) in transition_values.iter().zip(transition_bounds.iter()) {
                let quotient = transition_value * zerofier_inv;
                terms.push(quotient);
                terms.push(quotient * shift(x, max_degree, bound));
            }
            for (leaves, &bound) in boundary_quotient_leaves.iter().zip(boundary_bounds.iter()) {
                let quotient = leaves[&index];
                terms.push(quotient);
                terms.push(quotient * shift(x, max_degree, bound));
            }

            let combination = terms
                .iter()
                .zip(weights.iter())
                .fold(E::ZERO, |acc, (&term, &weight)| acc + term * weight);
            if combination != value {
                return Err(VerifierError::CombinationMismatch(index));
            }
        }

        Ok(())
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Reads a value and its authentication path for every position, and checks the paths against
/// `root`.
fn read_openings<E: StarkField, H: Hasher>(
    stream: &mut ProofStream<E, H>,
    codeword: usize,
    root: H::Digest,
    positions: &[usize],
) -> Result<BTreeMap<usize, E>, VerifierError> {
    let mut leaves = BTreeMap::new();
    for &position in positions {
        let leaf = stream.pull_element()?;
        let path = stream.pull_path()?;
        if !crypto::verify::<H, E>(root, position, &path, &leaf) {
            return Err(VerifierError::OpeningDoesNotMatchCommitment(codeword, position));
        }
        leaves.insert(position, leaf);
    }
    Ok(leaves)
}

/// Returns `x^(max_degree - bound)`, the factor which lifts a quotient of degree `bound` to
/// `max_degree`.
fn shift<E: FieldElement>(x: E, max_degree: usize, bound: usize) -> E {
    x.exp((max_degree.saturating_sub(bound) as u64).into())
}
