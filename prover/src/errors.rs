// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains the error type returned by the prover.

use core::fmt;

use air::ConstraintError;
use crypto::MerkleTreeError;
use fri::FriError;
use math::MathError;

// PROVER ERROR
// ================================================================================================
/// Represents an error returned by the prover during an execution of the protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProverError {
    /// This error occurs when transition or boundary constraints do not fit the configuration of
    /// the prover.
    InvalidConstraints(ConstraintError),
    /// This error occurs when the execution trace has an unexpected number of registers;
    /// (expected, actual).
    TraceWidthMismatch(usize, usize),
    /// This error occurs when the execution trace has an unexpected number of cycles;
    /// (expected, actual).
    TraceLengthMismatch(usize, usize),
    /// This error occurs when a trace cell does not hold the value asserted by a boundary
    /// constraint; (cycle, register).
    UnsatisfiedBoundaryConstraint(usize, usize),
    /// This error occurs when a transition constraint does not evaluate to ZERO on a pair of
    /// consecutive rows; (constraint index, cycle).
    UnsatisfiedTransitionConstraint(usize, usize),
    /// This error occurs when a boundary or a transition polynomial is not divisible by its
    /// zerofier, which means that the trace does not satisfy the constraints.
    ExactDivisionFailure(MathError),
    /// This error occurs when polynomial arithmetic fails while arithmetizing the trace.
    Math(MathError),
    /// This error occurs when a codeword cannot be committed to or opened.
    MerkleTree(MerkleTreeError),
    /// This error occurs when the FRI proof for the combination codeword cannot be built.
    Fri(FriError),
}

impl fmt::Display for ProverError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConstraints(err) => {
                write!(f, "constraints are invalid: {err}")
            }
            Self::TraceWidthMismatch(expected, actual) => {
                write!(f, "execution trace must have {expected} registers, but had {actual}")
            }
            Self::TraceLengthMismatch(expected, actual) => {
                write!(f, "execution trace must have {expected} cycles, but had {actual}")
            }
            Self::UnsatisfiedBoundaryConstraint(cycle, register) => {
                write!(f, "boundary constraint against register {register} was not satisfied at cycle {cycle}")
            }
            Self::UnsatisfiedTransitionConstraint(index, cycle) => {
                write!(f, "transition constraint {index} was not satisfied at cycle {cycle}")
            }
            Self::ExactDivisionFailure(err) => {
                write!(f, "quotient polynomial could not be computed: {err}")
            }
            Self::Math(err) => {
                write!(f, "polynomial arithmetic failed: {err}")
            }
            Self::MerkleTree(err) => {
                write!(f, "codeword commitment failed: {err}")
            }
            Self::Fri(err) => {
                write!(f, "FRI proof generation failed: {err}")
            }
        }
    }
}

impl std::error::Error for ProverError {}

impl From<ConstraintError> for ProverError {
    fn from(err: ConstraintError) -> Self {
        Self::InvalidConstraints(err)
    }
}

impl From<MathError> for ProverError {
    fn from(err: MathError) -> Self {
        Self::Math(err)
    }
}

impl From<MerkleTreeError> for ProverError {
    fn from(err: MerkleTreeError) -> Self {
        Self::MerkleTree(err)
    }
}

impl From<FriError> for ProverError {
    fn from(err: FriError) -> Self {
        Self::Fri(err)
    }
}
