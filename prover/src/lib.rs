// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains Glacier STARK prover.
//!
//! This prover can be used to generate proofs of computational integrity using the
//! [STARK](https://eprint.iacr.org/2018/046) (Scalable Transparent ARguments of Knowledge)
//! protocol.
//!
//! When the crate is compiled with `concurrent` feature enabled, interpolation of trace registers
//! and evaluation of polynomials over the FRI domain will be performed in multiple threads. The
//! number of threads can be configured via `RAYON_NUM_THREADS` environment variable.
//!
//! # Usage
//! To generate a proof that a computation was executed correctly, you'll need to do the
//! following:
//!
//! 1. Describe the computation by a set of transition constraints (multivariate polynomials over
//!    the domain point, the current row and the next row of the trace) and a set of
//!    [BoundaryConstraint]s.
//! 2. Execute your computation and record its execution trace in a [TraceTable].
//! 3. Build a [StarkContext] for the shape of the trace and instantiate a [StarkProver] with it.
//!    Then execute [StarkProver::prove()] passing the trace, the constraints, and a source of
//!    randomness into it. The function will return the bytes of the proof.
//!
//! The randomness is used to mask the trace with random rows and to sample the randomizer
//! polynomial; it does not need to be shared with the verifier.

use core::marker::PhantomData;

pub use air::{BoundaryConstraint, ConfigurationError, ConstraintError, StarkContext, StarkOptions};
use air::sample_weights;
pub use crypto;
use crypto::{Hasher, MerkleTree, ProofStream};
use fri::FriProver;
pub use math;
use math::{fft, MultivariatePolynomial, Polynomial, StarkField};
use rand::RngCore;
use tracing::{event, info_span, instrument, Level};
#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::iter;

mod trace;
pub use trace::TraceTable;

mod errors;
pub use errors::ProverError;

#[cfg(test)]
mod tests;

// STARK PROVER
// ================================================================================================
/// Generates STARK proofs for execution traces of a specific shape.
///
/// All parameters of the protocol are defined by the [StarkContext] the prover is instantiated
/// with; a verifier instantiated with the same context accepts the proofs generated by this
/// prover. `H` is the hash function used for Merkle commitments and Fiat-Shamir challenges.
#[derive(Debug, Clone)]
pub struct StarkProver<E: StarkField, H: Hasher> {
    context: StarkContext<E>,
    _hasher: PhantomData<H>,
}

impl<E: StarkField, H: Hasher> StarkProver<E, H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns a new prover for the specified context.
    pub fn new(context: StarkContext<E>) -> Self {
        StarkProver { context, _hasher: PhantomData }
    }

    // ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the context this prover was instantiated with.
    pub fn context(&self) -> &StarkContext<E> {
        &self.context
    }

    // PROVER
    // --------------------------------------------------------------------------------------------

    /// Returns a STARK proof attesting that `trace` satisfies `transition_constraints` and
    /// `boundary`.
    ///
    /// The proof is the serialized [ProofStream] written during proof generation. Random rows
    /// appended to the trace and the randomizer polynomial are drawn from `rng`.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The constraints do not fit the context of this prover.
    /// * The trace does not have the shape described by the context.
    /// * The trace does not satisfy the constraints. In debug builds every constraint is checked
    ///   against the trace before anything is committed to; otherwise the violation surfaces as
    ///   a failed exact division.
    /// * A commitment or the FRI proof could not be built.
    #[instrument(skip_all, fields(num_registers = self.context.num_registers(), trace_length = trace.length()))]
    pub fn prove<R: RngCore + ?Sized>(
        &self,
        trace: TraceTable<E>,
        transition_constraints: &[MultivariatePolynomial<E>],
        boundary: &[BoundaryConstraint<E>],
        rng: &mut R,
    ) -> Result<Vec<u8>, ProverError> {
        let context = &self.context;

        // 0 ----- validate inputs ----------------------------------------------------------------
        context.validate_transition_constraints(transition_constraints)?;
        context.validate_boundary(boundary)?;
        trace.check_shape(context)?;

        // make sure the specified trace is valid against the constraints. We do this in debug
        // mode only because this is a very expensive operation.
        #[cfg(debug_assertions)]
        trace::validate_trace(&trace, context, transition_constraints, boundary)?;

        let mut stream = ProofStream::<E, H>::new();

        // 1 ----- randomize and interpolate the execution trace ----------------------------------
        let randomized_trace_length = context.randomized_trace_length();
        let trace_polys = {
            let span = info_span!("interpolate_trace", randomized_trace_length).entered();
            let mut trace = trace;
            trace.append_random_rows(context.num_randomizers(), rng);
            let trace_polys = trace.interpolate_columns(&context.trace_domain(trace.length()))?;
            drop(span);
            trace_polys
        };

        // 2 ----- commit to boundary quotients ---------------------------------------------------
        let boundary_quotients = build_boundary_quotients(context, &trace_polys, boundary)?;
        let fri_domain_length = context.fri_domain_length();
        let boundary_quotient_codewords = info_span!("commit_to_boundary_quotients", fri_domain_length)
            .in_scope(|| evaluate_over_fri_domain(context, &boundary_quotients));
        let boundary_quotient_trees = build_trees::<E, H>(&boundary_quotient_codewords)?;
        for tree in boundary_quotient_trees.iter() {
            stream.push_digest(*tree.root());
        }

        // 3 ----- compute transition quotients ---------------------------------------------------
        let transition_quotients =
            build_transition_quotients(context, &trace_polys, transition_constraints)?;

        // 4 ----- commit to the randomizer polynomial --------------------------------------------
        let max_degree = context.max_degree(transition_constraints);
        let randomizer = Polynomial::new(draw_random_elements::<E, R>(max_degree + 1, rng));
        let randomizer_codeword =
            fft::evaluate_poly_on_coset(randomizer.coefficients(), fri_domain_length, context.generator());
        let randomizer_tree = MerkleTree::<H>::from_values(&randomizer_codeword)?;
        stream.push_digest(*randomizer_tree.root());

        // 5 ----- build the combination codeword -------------------------------------------------
        let weights = sample_weights::<E, H>(
            context.num_weights(transition_quotients.len()),
            stream.prover_fiat_shamir(),
        );
        let combination = {
            let span = info_span!("build_combination_poly", max_degree).entered();
            let mut terms = vec![randomizer];
            let bounds = context.transition_quotient_degree_bounds(transition_constraints);
            terms.extend(shifted_terms(transition_quotients, &bounds, max_degree));
            let bounds = context.boundary_quotient_degree_bounds(randomized_trace_length, boundary);
            terms.extend(shifted_terms(boundary_quotients, &bounds, max_degree));

            let combination = terms
                .iter()
                .zip(weights)
                .fold(Polynomial::zero(), |acc, (term, weight)| acc + term.mul_by_const(weight));
            event!(Level::DEBUG, "degree: {:?}", combination.degree());

            drop(span);
            combination
        };
        let combined_codeword =
            fft::evaluate_poly_on_coset(combination.coefficients(), fri_domain_length, context.generator());

        // 6 ----- prove low degree of the combination codeword -----------------------------------
        let fri_prover = FriProver::<E, H>::new(context.fri_options());
        let num_rounds = fri_prover.options().num_rounds();
        let indices = info_span!("prove_low_degree", num_rounds)
            .in_scope(|| fri_prover.prove(combined_codeword, &mut stream))?;

        // 7 ----- open boundary quotients and the randomizer -------------------------------------
        let span = info_span!("open_commitments").entered();
        let positions = get_opening_positions(&indices, context.expansion_factor(), fri_domain_length);
        event!(Level::DEBUG, "opened_positions_len: {}", positions.len());
        for (codeword, tree) in boundary_quotient_codewords.iter().zip(boundary_quotient_trees.iter()) {
            open_codeword(&mut stream, codeword, tree, &positions)?;
        }
        open_codeword(&mut stream, &randomizer_codeword, &randomizer_tree, &positions)?;
        drop(span);

        let proof = stream.to_bytes();
        event!(Level::DEBUG, "proof_size: {} bytes", proof.len());
        Ok(proof)
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Divides every trace polynomial, with its boundary interpolant subtracted, by its boundary
/// zerofier.
#[instrument(skip_all)]
fn build_boundary_quotients<E: StarkField>(
    context: &StarkContext<E>,
    trace_polys: &[Polynomial<E>],
    boundary: &[BoundaryConstraint<E>],
) -> Result<Vec<Polynomial<E>>, ProverError> {
    let interpolants = context.boundary_interpolants(boundary)?;
    let zerofiers = context.boundary_zerofiers(boundary);
    trace_polys
        .iter()
        .zip(interpolants.iter().zip(zerofiers.iter()))
        .map(|(trace_poly, (interpolant, zerofier))| {
            (trace_poly - interpolant)
                .exact_div(zerofier)
                .map_err(ProverError::ExactDivisionFailure)
        })
        .collect()
}

/// Evaluates transition constraints symbolically at `[x] + trace_polys + shifted_trace_polys`
/// and divides the results by the transition zerofier.
#[instrument(skip_all)]
fn build_transition_quotients<E: StarkField>(
    context: &StarkContext<E>,
    trace_polys: &[Polynomial<E>],
    transition_constraints: &[MultivariatePolynomial<E>],
) -> Result<Vec<Polynomial<E>>, ProverError> {
    let mut point = Vec::with_capacity(1 + 2 * trace_polys.len());
    point.push(Polynomial::x());
    point.extend(trace_polys.iter().cloned());
    point.extend(trace_polys.iter().map(|poly| poly.scale(context.omicron())));

    let zerofier = context.transition_zerofier();
    transition_constraints
        .iter()
        .map(|constraint| {
            constraint
                .evaluate_symbolic(&point)?
                .exact_div(&zerofier)
                .map_err(ProverError::ExactDivisionFailure)
        })
        .collect()
}

/// Returns `[q, x^(max_degree - bound) * q]` for every quotient `q` and its degree bound.
fn shifted_terms<E: StarkField>(
    quotients: Vec<Polynomial<E>>,
    bounds: &[usize],
    max_degree: usize,
) -> Vec<Polynomial<E>> {
    let mut terms = Vec::with_capacity(2 * quotients.len());
    for (quotient, &bound) in quotients.into_iter().zip(bounds) {
        let shift = Polynomial::monomial(max_degree.saturating_sub(bound), E::ONE);
        let shifted = &shift * &quotient;
        terms.push(quotient);
        terms.push(shifted);
    }
    terms
}

/// Evaluates every polynomial over the FRI domain of the context.
fn evaluate_over_fri_domain<E: StarkField>(
    context: &StarkContext<E>,
    polys: &[Polynomial<E>],
) -> Vec<Vec<E>> {
    iter!(polys)
        .map(|poly| {
            fft::evaluate_poly_on_coset(
                poly.coefficients(),
                context.fri_domain_length(),
                context.generator(),
            )
        })
        .collect()
}

fn build_trees<E: StarkField, H: Hasher>(
    codewords: &[Vec<E>],
) -> Result<Vec<MerkleTree<H>>, ProverError> {
    codewords
        .iter()
        .map(|codeword| MerkleTree::<H>::from_values(codeword).map_err(ProverError::from))
        .collect()
}

/// Returns the positions at which committed codewords are opened: the indices queried by FRI,
/// the indices shifted by `expansion_factor`, and all of these shifted by half of the domain.
/// The positions are sorted and may contain repetitions.
pub(crate) fn get_opening_positions(
    indices: &[usize],
    expansion_factor: usize,
    domain_length: usize,
) -> Vec<usize> {
    let mut duplicated = indices.to_vec();
    duplicated.extend(indices.iter().map(|&i| (i + expansion_factor) % domain_length));

    let mut quadrupled = duplicated.clone();
    quadrupled.extend(duplicated.iter().map(|&i| (i + domain_length / 2) % domain_length));
    quadrupled.sort_unstable();
    quadrupled
}

/// Pushes the value of `codeword` and its authentication path at every position.
fn open_codeword<E: StarkField, H: Hasher>(
    stream: &mut ProofStream<E, H>,
    codeword: &[E],
    tree: &MerkleTree<H>,
    positions: &[usize],
) -> Result<(), ProverError> {
    for &position in positions {
        stream.push_element(codeword[position]);
        stream.push_path(tree.prove(position)?);
    }
    Ok(())
}

/// Returns `n` field elements sampled from bytes drawn from `rng`.
pub(crate) fn draw_random_elements<E: StarkField, R: RngCore + ?Sized>(
    n: usize,
    rng: &mut R,
) -> Vec<E> {
    // extra bytes make the reduction modulo the field modulus close to uniform
    let mut bytes = vec![0u8; E::ELEMENT_BYTES + 16];
    (0..n)
        .map(|_| {
            rng.fill_bytes(&mut bytes);
            E::sample(&bytes)
        })
        .collect()
}
