// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt;

use utils::DeserializationError;

// MERKLE TREE ERROR
// ================================================================================================

/// Defines errors which can occur when building or opening a Merkle tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MerkleTreeError {
    /// A tree cannot be built from an empty set of leaves.
    NoLeaves,
    /// Number of leaves for a Merkle tree must be a power of two, but {0} leaves were provided.
    NumberOfLeavesNotPowerOfTwo(usize),
    /// Leaf index {0} cannot exceed {1}, the number of leaves in the tree.
    LeafIndexOutOfBounds(usize, usize),
}

impl fmt::Display for MerkleTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLeaves => {
                write!(f, "a Merkle tree must contain at least one leaf")
            },
            Self::NumberOfLeavesNotPowerOfTwo(num_leaves) => {
                write!(f, "number of leaves must be a power of two, but {num_leaves} were provided")
            },
            Self::LeafIndexOutOfBounds(index, num_leaves) => {
                write!(f, "leaf index {index} is out of bounds for a tree with {num_leaves} leaves")
            },
        }
    }
}

impl std::error::Error for MerkleTreeError {}

// PROOF STREAM ERROR
// ================================================================================================

/// Defines errors which can occur when reading objects from a proof stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofStreamError {
    /// The next object in the stream is missing or is not of the expected kind.
    ProtocolViolation(String),
    /// The stream could not be decoded from bytes.
    Deserialization(DeserializationError),
}

impl fmt::Display for ProofStreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProtocolViolation(msg) => {
                write!(f, "proof stream protocol violation: {msg}")
            },
            Self::Deserialization(err) => {
                write!(f, "failed to deserialize proof stream: {err}")
            },
        }
    }
}

impl std::error::Error for ProofStreamError {}

impl From<DeserializationError> for ProofStreamError {
    fn from(err: DeserializationError) -> Self {
        Self::Deserialization(err)
    }
}
