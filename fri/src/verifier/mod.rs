// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::marker::PhantomData;

use crypto::{Digest, Hasher, ProofStream};
use math::{fft, Polynomial, StarkField};
use tracing::{event, Level};

use crate::{errors::VerifierError, utils::sample_indices, FriOptions};

// FRI VERIFIER
// ================================================================================================

/// Verifies FRI proofs of proximity to low-degree polynomials.
#[derive(Debug, Clone)]
pub struct FriVerifier<E: StarkField, H: Hasher> {
    options: FriOptions<E>,
    _hasher: PhantomData<H>,
}

impl<E: StarkField, H: Hasher> FriVerifier<E, H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns a new FRI verifier instantiated with the specified options.
    pub fn new(options: FriOptions<E>) -> Self {
        FriVerifier { options, _hasher: PhantomData }
    }

    // ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the options this verifier was instantiated with.
    pub fn options(&self) -> &FriOptions<E> {
        &self.options
    }

    // VERIFIER
    // --------------------------------------------------------------------------------------------

    /// Reads a FRI proof from `stream` and returns true if it is valid.
    ///
    /// For every query of the first round, the (index, value) pairs at indices `a` and
    /// `a + domain_length / 2` are appended to `polynomial_values`, so that the caller can link
    /// them to its own commitments. When this function returns false, the contents of
    /// `polynomial_values` are meaningless.
    pub fn verify(
        &self,
        stream: &mut ProofStream<E, H>,
        polynomial_values: &mut Vec<(usize, E)>,
    ) -> bool {
        match self.verify_proof(stream, polynomial_values) {
            Ok(()) => true,
            Err(err) => {
                event!(Level::DEBUG, "FRI proof rejected: {}", err);
                false
            },
        }
    }

    // HELPER METHODS
    // --------------------------------------------------------------------------------------------

    fn verify_proof(
        &self,
        stream: &mut ProofStream<E, H>,
        polynomial_values: &mut Vec<(usize, E)>,
    ) -> Result<(), VerifierError> {
        let num_rounds = self.options.num_rounds();
        if num_rounds < 2 {
            return Err(VerifierError::InsufficientRounds(num_rounds));
        }
        let domain_length = self.options.domain_length();

        // read commitments of all rounds and re-derive folding challenges
        let mut roots = Vec::with_capacity(num_rounds);
        let mut alphas = Vec::with_capacity(num_rounds - 1);
        for round in 0..num_rounds {
            roots.push(stream.pull_digest()?);
            if round < num_rounds - 1 {
                alphas.push(E::sample(&stream.verifier_fiat_shamir().as_bytes()));
            }
        }

        // check the last codeword against its commitment and test its degree directly
        let last_codeword = stream.pull_codeword()?;
        let last_length = self.options.last_codeword_length();
        if last_codeword.len() != last_length {
            return Err(VerifierError::LastCodewordLengthMismatch(
                last_length,
                last_codeword.len(),
            ));
        }
        match crypto::commit::<H, E>(&last_codeword) {
            Ok(root) if root == roots[num_rounds - 1] => (),
            _ => return Err(VerifierError::LastCodewordCommitmentMismatch),
        }

        // the domain of the last round is the coset of the subgroup of size last_length shifted
        // by offset^(2^(num_rounds - 1))
        let mut last_offset = self.options.offset();
        for _ in 0..num_rounds - 1 {
            last_offset = last_offset.square();
        }
        let mut coefficients = last_codeword;
        let inv_twiddles = fft::get_inv_twiddles::<E>(last_length);
        fft::interpolate_poly_with_offset(&mut coefficients, &inv_twiddles, last_offset);
        let max_num_coefficients = last_length / self.options.expansion_factor();
        if coefficients[max_num_coefficients..].iter().any(|&c| c != E::ZERO) {
            return Err(VerifierError::LastCodewordDegreeTooHigh(
                max_num_coefficients.saturating_sub(1),
            ));
        }

        let top_level_indices = sample_indices::<H>(
            stream.verifier_fiat_shamir(),
            domain_length >> 1,
            domain_length >> (num_rounds - 1),
            self.options.num_colinearity_tests(),
        );

        let mut omega = self.options.omega();
        let mut offset = self.options.offset();
        for round in 0..num_rounds - 1 {
            let half_length = domain_length >> (round + 1);
            let c_indices: Vec<usize> =
                top_level_indices.iter().map(|index| index % half_length).collect();

            let mut triplets = Vec::with_capacity(c_indices.len());
            for &a in c_indices.iter() {
                let (ay, by, cy) = stream.pull_triplet()?;
                let b = a + half_length;
                if round == 0 {
                    polynomial_values.push((a, ay));
                    polynomial_values.push((b, by));
                }

                let ax = offset * omega.exp((a as u64).into());
                let bx = offset * omega.exp((b as u64).into());
                if !Polynomial::test_colinearity(&[(ax, ay), (bx, by), (alphas[round], cy)]) {
                    return Err(VerifierError::InvalidFolding(round));
                }
                triplets.push((ay, by, cy));
            }

            for (&a, &(ay, by, cy)) in c_indices.iter().zip(triplets.iter()) {
                let a_path = stream.pull_path()?;
                let b_path = stream.pull_path()?;
                let c_path = stream.pull_path()?;
                if !crypto::verify::<H, E>(roots[round], a, &a_path, &ay)
                    || !crypto::verify::<H, E>(roots[round], a + half_length, &b_path, &by)
                    || !crypto::verify::<H, E>(roots[round + 1], a, &c_path, &cy)
                {
                    return Err(VerifierError::LayerCommitmentMismatch(round));
                }
            }

            omega = omega.square();
            offset = offset.square();
        }

        Ok(())
    }
}
