// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::marker::PhantomData;

use crypto::{Digest, Hasher, MerkleTree, ProofStream};
use math::StarkField;
use tracing::{event, Level};

use crate::{folding::fold_codeword, utils::sample_indices, FriError, FriOptions};


// FRI PROVER
// ================================================================================================

/// Generates FRI proofs of proximity to low-degree polynomials.
///
/// The prover writes all of its messages into a [ProofStream], and derives every challenge from
/// the contents of that stream.
#[derive(Debug, Clone)]
pub struct FriProver<E: StarkField, H: Hasher> {
    options: FriOptions<E>,
    _hasher: PhantomData<H>,
}

impl<E: StarkField, H: Hasher> FriProver<E, H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns a new FRI prover instantiated with the specified options.
    pub fn new(options: FriOptions<E>) -> Self {
        FriProver { options, _hasher: PhantomData }
    }

    // ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the options this prover was instantiated with.
    pub fn options(&self) -> &FriOptions<E> {
        &self.options
    }

    // PROVER
    // --------------------------------------------------------------------------------------------

    /// Proves that `codeword` is close to a polynomial of degree lower than
    /// `domain_length / expansion_factor`, and returns the queried indices of the first round.
    ///
    /// The codeword must contain evaluations over the evaluation domain of the options. The
    /// returned indices `i` are those at which the codeword was opened together with
    /// `i + domain_length / 2`; the caller is expected to tie these values back to its own
    /// commitments.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The length of `codeword` differs from the domain length.
    /// - The options allow fewer than two commit rounds.
    pub fn prove(
        &self,
        codeword: Vec<E>,
        stream: &mut ProofStream<E, H>,
    ) -> Result<Vec<usize>, FriError> {
        if codeword.len() != self.options.domain_length() {
            return Err(FriError::CodewordLengthMismatch(
                self.options.domain_length(),
                codeword.len(),
            ));
        }
        let num_rounds = self.options.num_rounds();
        if num_rounds < 2 {
            return Err(FriError::InsufficientRounds(num_rounds));
        }

        let codewords = self.commit(codeword, stream)?;

        let top_level_indices = sample_indices::<H>(
            stream.prover_fiat_shamir(),
            codewords[1].len(),
            codewords[codewords.len() - 1].len(),
            self.options.num_colinearity_tests(),
        );

        let mut indices = top_level_indices.clone();
        for round in codewords.windows(2) {
            let half_length = round[0].len() / 2;
            indices.iter_mut().for_each(|index| *index %= half_length);
            self.query(&round[0], &round[1], &indices, stream)?;
        }

        event!(
            Level::DEBUG,
            "generated FRI proof with {} rounds and {} queries",
            num_rounds,
            top_level_indices.len()
        );
        Ok(top_level_indices)
    }

    // HELPER METHODS
    // --------------------------------------------------------------------------------------------

    /// Executes the commit phase of the protocol and returns the codewords of all rounds.
    fn commit(
        &self,
        codeword: Vec<E>,
        stream: &mut ProofStream<E, H>,
    ) -> Result<Vec<Vec<E>>, FriError> {
        let num_rounds = self.options.num_rounds();
        let mut omega = self.options.omega();
        let mut offset = self.options.offset();

        let mut codewords = Vec::with_capacity(num_rounds);
        let mut codeword = codeword;
        for round in 0..num_rounds {
            stream.push_digest(crypto::commit::<H, E>(&codeword)?);
            if round == num_rounds - 1 {
                break;
            }

            let alpha = E::sample(&stream.prover_fiat_shamir().as_bytes());
            let folded = fold_codeword(&codeword, alpha, offset, omega);
            codewords.push(codeword);
            codeword = folded;

            omega = omega.square();
            offset = offset.square();
        }

        stream.push_codeword(codeword.clone());
        codewords.push(codeword);
        Ok(codewords)
    }

    /// Opens the current codeword at `c` and `c + N / 2` and the next codeword at `c` for every
    /// index `c` in `c_indices`.
    fn query(
        &self,
        current_codeword: &[E],
        next_codeword: &[E],
        c_indices: &[usize],
        stream: &mut ProofStream<E, H>,
    ) -> Result<(), FriError> {
        let half_length = current_codeword.len() / 2;

        for &c in c_indices {
            stream.push_triplet(
                current_codeword[c],
                current_codeword[c + half_length],
                next_codeword[c],
            );
        }

        let current_tree = MerkleTree::<H>::from_values(current_codeword)?;
        let next_tree = MerkleTree::<H>::from_values(next_codeword)?;
        for &c in c_indices {
            stream.push_path(current_tree.prove(c)?);
            stream.push_path(current_tree.prove(c + half_length)?);
            stream.push_path(next_tree.prove(c)?);
        }

        Ok(())
    }
}
