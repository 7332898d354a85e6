// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains the reasons for which the verifier rejects a proof.

use core::fmt;

use air::ConstraintError;
use crypto::ProofStreamError;
use math::MathError;

// VERIFIER ERROR
// ================================================================================================
/// Represents a reason for which the verifier rejects a proof.
///
/// These errors are never returned to the caller of the verifier; they are only reported as
/// debug events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum VerifierError {
    /// This error occurs when transition or boundary constraints do not fit the configuration of
    /// the verifier.
    InvalidConstraints(ConstraintError),
    /// This error occurs when the proof cannot be deserialized, or when it does not contain the
    /// objects the verifier expects to read.
    ProofStream(ProofStreamError),
    /// This error occurs when the proof contains objects which were not read by the verifier.
    UnconsumedProofObjects(usize),
    /// This error occurs when the FRI proof of the combination codeword is rejected.
    LowDegreeTestFailed,
    /// This error occurs when an opened value of a committed codeword does not match the
    /// commitment; (codeword index, position). The codeword with index equal to the number of
    /// registers is the randomizer codeword.
    OpeningDoesNotMatchCommitment(usize, usize),
    /// This error occurs when evaluating constraints or zerofiers at a queried point fails.
    Math(MathError),
    /// This error occurs when the combination of quotients reconstructed from the openings does
    /// not match the value attested to by FRI at the specified position.
    CombinationMismatch(usize),
}

impl fmt::Display for VerifierError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConstraints(err) => {
                write!(f, "constraints are invalid: {err}")
            }
            Self::ProofStream(err) => {
                write!(f, "proof could not be read: {err}")
            }
            Self::UnconsumedProofObjects(num_objects) => {
                write!(f, "{num_objects} objects of the proof were not read")
            }
            Self::LowDegreeTestFailed => {
                write!(f, "verification of low-degree proof failed")
            }
            Self::OpeningDoesNotMatchCommitment(codeword, position) => {
                write!(f, "value of codeword {codeword} at position {position} did not match the commitment")
            }
            Self::Math(err) => {
                write!(f, "evaluation at a queried point failed: {err}")
            }
            Self::CombinationMismatch(position) => {
                write!(f, "combination of quotients did not match the low-degree codeword at position {position}")
            }
        }
    }
}

impl From<ConstraintError> for VerifierError {
    fn from(err: ConstraintError) -> Self {
        Self::InvalidConstraints(err)
    }
}

impl From<ProofStreamError> for VerifierError {
    fn from(err: ProofStreamError) -> Self {
        Self::ProofStream(err)
    }
}

impl From<MathError> for VerifierError {
    fn from(err: MathError) -> Self {
        Self::Math(err)
    }
}
