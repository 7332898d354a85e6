// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt;

use crypto::{MerkleTreeError, ProofStreamError};

// FRI ERROR
// ================================================================================================

/// Defines errors which can occur during FRI proof generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FriError {
    /// The codeword passed to the prover does not cover the evaluation domain; (expected, actual).
    CodewordLengthMismatch(usize, usize),
    /// The options yield fewer than two commit rounds, which leaves nothing to query.
    InsufficientRounds(usize),
    /// A codeword could not be committed to or opened.
    MerkleTree(MerkleTreeError),
}

impl fmt::Display for FriError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodewordLengthMismatch(expected, actual) => {
                write!(f, "codeword must contain {expected} evaluations, but contained {actual}")
            }
            Self::InsufficientRounds(num_rounds) => {
                write!(f, "FRI requires at least 2 rounds, but the options allow only {num_rounds}")
            }
            Self::MerkleTree(err) => {
                write!(f, "failed to commit to a FRI codeword: {err}")
            }
        }
    }
}

impl std::error::Error for FriError {}

impl From<MerkleTreeError> for FriError {
    fn from(err: MerkleTreeError) -> Self {
        Self::MerkleTree(err)
    }
}

// VERIFIER ERROR
// ================================================================================================

/// Reasons for which a FRI proof is rejected; these are only reported through tracing events.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum VerifierError {
    /// The proof stream ended early or contained an object of an unexpected kind.
    ProofStream(ProofStreamError),
    /// The options yield fewer than two commit rounds.
    InsufficientRounds(usize),
    /// The last codeword has an unexpected length; (expected, actual).
    LastCodewordLengthMismatch(usize, usize),
    /// The last codeword does not match the commitment of the last round.
    LastCodewordCommitmentMismatch,
    /// The last codeword is not a polynomial of the expected degree.
    LastCodewordDegreeTooHigh(usize),
    /// A queried triplet was not colinear with the folding challenge of the round.
    InvalidFolding(usize),
    /// A queried value did not match the commitment of the round.
    LayerCommitmentMismatch(usize),
}

impl fmt::Display for VerifierError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProofStream(err) => {
                write!(f, "failed to read FRI proof: {err}")
            }
            Self::InsufficientRounds(num_rounds) => {
                write!(f, "FRI requires at least 2 rounds, but the options allow only {num_rounds}")
            }
            Self::LastCodewordLengthMismatch(expected, actual) => {
                write!(f, "last FRI codeword must contain {expected} values, but contained {actual}")
            }
            Self::LastCodewordCommitmentMismatch => {
                write!(f, "last FRI codeword did not match the commitment")
            }
            Self::LastCodewordDegreeTooHigh(degree) => {
                write!(f, "last FRI codeword is not a polynomial of degree at most {degree}")
            }
            Self::InvalidFolding(round) => {
                write!(f, "colinearity check failed at round {round}")
            }
            Self::LayerCommitmentMismatch(round) => {
                write!(f, "FRI queries did not match the commitment at round {round}")
            }
        }
    }
}

impl From<ProofStreamError> for VerifierError {
    fn from(err: ProofStreamError) -> Self {
        Self::ProofStream(err)
    }
}
