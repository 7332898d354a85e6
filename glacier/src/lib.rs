// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains Glacier STARK prover and verifier.
//!
//! A STARK is a novel proof-of-computation scheme to create efficiently verifiable proofs of the
//! correct execution of a computation. The scheme was developed by Eli Ben-Sasson, Michael
//! Riabzev et al. at Technion - Israel Institute of Technology. STARKs do not require an initial
//! trusted setup, and rely on very few cryptographic assumptions. See
//! [references](#references) for more info.
//!
//! ## Proof generation
//! To generate a proof that a computation was executed correctly, you'll need to do the
//! following:
//!
//! 1. Define the shape of the execution trace (number of registers and cycles) and the degree
//!    of transition constraints, and instantiate a [Stark] with them and a set of
//!    [StarkOptions].
//! 2. Describe transition constraints of your computation as [MultivariatePolynomial]s over
//!    `1 + 2 * num_registers` variables, which can be obtained via
//!    [transition_variables()](transition::transition_variables). The first variable is the
//!    domain point, followed by the current row and the next row of the trace.
//! 3. Describe the inputs and the outputs of the computation as [BoundaryConstraint]s.
//! 4. Execute your computation and record its execution trace in a [TraceTable].
//! 5. Call [Stark::prove()] passing the trace, the constraints and a source of randomness.
//!
//! The proof is returned as a vector of bytes. The randomness is used only to mask the trace and
//! does not need to be shared with the verifier.
//!
//! ## Proof verification
//! To verify a proof, instantiate a [Stark] with the same parameters as the prover and call
//! [Stark::verify()] passing the proof bytes and the same constraints. The verifier returns
//! `true` only if the proof attests that some execution trace satisfies all constraints; it
//! never reports why a proof was rejected.
//!
//! Proofs generated with one hash function cannot be verified with another, so the prover and
//! the verifier must agree on `H` as well.
//!
//! # Examples
//! Below we prove a computation of the 4th element of the Fibonacci sequence. The execution
//! trace has two registers, and on every step `(a, b)` becomes `(b, a + b)`.
//!
//! ```no_run
//! use glacier::{
//!     crypto::hashers::Blake3_256,
//!     math::{fields::f128::BaseElement, FieldElement},
//!     transition::transition_variables,
//!     BoundaryConstraint, Stark, StarkOptions, TraceTable,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // build the execution trace
//! let mut trace = TraceTable::new(2, 4);
//! trace.fill(
//!     |state| {
//!         state[0] = BaseElement::ONE;
//!         state[1] = BaseElement::ONE;
//!     },
//!     |_, state| {
//!         let next = state[0] + state[1];
//!         state[0] = state[1];
//!         state[1] = next;
//!     },
//! );
//!
//! // next[0] = current[1] and next[1] = current[0] + current[1]
//! let (_, current, next) = transition_variables::<BaseElement>(2);
//! let constraints = vec![&next[0] - &current[1], &(&next[1] - &current[0]) - &current[1]];
//!
//! // the sequence starts with (1, 1) and the 4th element is 5
//! let boundary = vec![
//!     BoundaryConstraint::new(0, 0, BaseElement::ONE),
//!     BoundaryConstraint::new(0, 1, BaseElement::ONE),
//!     BoundaryConstraint::new(3, 1, BaseElement::new(5)),
//! ];
//!
//! let options = StarkOptions::new(4, 8, 16).unwrap();
//! let stark = Stark::<BaseElement, Blake3_256>::new(options, 2, 4, 2).unwrap();
//!
//! let proof = stark
//!     .prove(trace, &constraints, &boundary, &mut StdRng::from_os_rng())
//!     .unwrap();
//! assert!(stark.verify(&proof, &constraints, &boundary));
//! ```
//!
//! # References
//!
//! If you are interested in learning how STARKs work under the hood, here are a few links to get
//! you started. From the standpoint of this library, *arithmetization* is by far the most
//! important concept to understand.
//!
//! * STARKs whitepaper: [Scalable, transparent, and post-quantum secure computational
//!   integrity](https://eprint.iacr.org/2018/046)
//! * STARKs vs. SNARKs: [A Cambrian Explosion of Crypto Proofs](https://nakamoto.com/cambrian-explosion-of-crypto-proofs/)
//! * StarkWare's STARK Math blog series:
//!   * [Arithmetization I](https://medium.com/starkware/arithmetization-i-15c046390862)
//!   * [Arithmetization II](https://medium.com/starkware/arithmetization-ii-403c3b3f4355)
//!   * [Low Degree Testing](https://medium.com/starkware/low-degree-testing-f7614f5172db)

pub use air::{
    implied_trace_length, transition, BoundaryConstraint, ConfigurationError, ConstraintError,
    StarkContext, StarkOptions,
};
pub use prover::{crypto, math, ProverError, StarkProver, TraceTable};
use crypto::Hasher;
use math::{MultivariatePolynomial, StarkField};
use rand::RngCore;
pub use verifier::StarkVerifier;

#[cfg(test)]
mod tests;

// STARK
// ================================================================================================
/// A STARK proof system for execution traces of a specific shape.
///
/// The instance owns a validated [StarkContext] and uses it to both generate and verify proofs.
/// Two instances built from the same parameters are interchangeable: a proof generated by one of
/// them is accepted by the other.
#[derive(Debug, Clone)]
pub struct Stark<E: StarkField, H: Hasher> {
    prover: StarkProver<E, H>,
    verifier: StarkVerifier<E, H>,
}

impl<E: StarkField, H: Hasher> Stark<E, H> {
    // CONSTANTS
    // --------------------------------------------------------------------------------------------

    /// Degree of transition constraints assumed by [Stark::with_default_degree()].
    pub const DEFAULT_TRANSITION_CONSTRAINTS_DEGREE: usize = 2;

    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a new STARK for a trace with `num_registers` registers and
    /// `original_trace_length` cycles, constrained by transition constraints of degree at most
    /// `transition_constraints_degree`.
    ///
    /// # Errors
    /// Returns an error if the field is too small for the security level of `options`, if the
    /// trace has no registers or no cycles, or if the field does not contain the roots of unity
    /// needed for the evaluation domains.
    pub fn new(
        options: StarkOptions,
        num_registers: usize,
        original_trace_length: usize,
        transition_constraints_degree: usize,
    ) -> Result<Self, ConfigurationError> {
        let context = StarkContext::new(
            options,
            num_registers,
            original_trace_length,
            transition_constraints_degree,
        )?;
        Ok(Self::from_context(context))
    }

    /// Returns a new STARK for transition constraints of degree at most 2.
    pub fn with_default_degree(
        options: StarkOptions,
        num_registers: usize,
        original_trace_length: usize,
    ) -> Result<Self, ConfigurationError> {
        Self::new(
            options,
            num_registers,
            original_trace_length,
            Self::DEFAULT_TRANSITION_CONSTRAINTS_DEGREE,
        )
    }

    /// Returns a new STARK for an already validated context.
    pub fn from_context(context: StarkContext<E>) -> Self {
        Stark {
            prover: StarkProver::new(context.clone()),
            verifier: StarkVerifier::new(context),
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the context shared by the prover and the verifier of this STARK.
    pub fn context(&self) -> &StarkContext<E> {
        self.prover.context()
    }

    /// Returns the options this STARK was built with.
    pub fn options(&self) -> &StarkOptions {
        self.context().options()
    }

    /// Returns the number of registers in the execution trace.
    pub fn num_registers(&self) -> usize {
        self.context().num_registers()
    }

    /// Returns the number of cycles in the execution trace before randomization.
    pub fn original_trace_length(&self) -> usize {
        self.context().original_trace_length()
    }

    /// Returns the number of random rows appended to the execution trace.
    pub fn num_randomizers(&self) -> usize {
        self.context().num_randomizers()
    }

    /// Returns the number of rows in the execution trace after randomization.
    pub fn randomized_trace_length(&self) -> usize {
        self.context().randomized_trace_length()
    }

    /// Returns the size of the domain generated by omicron.
    pub fn omicron_domain_length(&self) -> usize {
        self.context().omicron_domain_length()
    }

    /// Returns the size of the FRI evaluation domain.
    pub fn fri_domain_length(&self) -> usize {
        self.context().fri_domain_length()
    }

    /// Returns the generator of the FRI domain.
    pub fn omega(&self) -> E {
        self.context().omega()
    }

    /// Returns the generator of the trace domain.
    pub fn omicron(&self) -> E {
        self.context().omicron()
    }

    // PROVE / VERIFY
    // --------------------------------------------------------------------------------------------

    /// Generates a proof that `trace` satisfies `transition_constraints` and `boundary`.
    ///
    /// See [StarkProver::prove()] for details.
    pub fn prove<R: RngCore + ?Sized>(
        &self,
        trace: TraceTable<E>,
        transition_constraints: &[MultivariatePolynomial<E>],
        boundary: &[BoundaryConstraint<E>],
        rng: &mut R,
    ) -> Result<Vec<u8>, ProverError> {
        self.prover.prove(trace, transition_constraints, boundary, rng)
    }

    /// Returns true if `proof` attests that some execution trace of the shape of this STARK
    /// satisfies `transition_constraints` and `boundary`.
    pub fn verify(
        &self,
        proof: &[u8],
        transition_constraints: &[MultivariatePolynomial<E>],
        boundary: &[BoundaryConstraint<E>],
    ) -> bool {
        self.verifier.verify(proof, transition_constraints, boundary)
    }
}
