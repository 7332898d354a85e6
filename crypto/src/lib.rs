// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains cryptographic primitives used in the Glacier STARK protocol.
//!
//! # Hash functions
//! [Hasher] trait abstracts away a cryptographic hash function producing fixed-size digests.
//! Two implementations are provided in the [hashers] module:
//! * BLAKE3 with 256-bit output ([Blake3_256](hashers::Blake3_256)).
//! * SHA3 with 256-bit output ([Sha3_256](hashers::Sha3_256)).
//!
//! # Merkle trees
//! [MerkleTree] is a vector commitment over a power-of-two number of leaf digests. Free functions
//! [commit], [open] and [verify] commit to (and open) vectors of serializable values by hashing
//! each value into a leaf digest.
//!
//! # Proof stream
//! [ProofStream] is the transcript exchanged between the prover and the verifier. It holds an
//! ordered list of [ProofObject]s and derives Fiat-Shamir challenges from the prefix of the
//! transcript seen by each party.

mod hash;
pub use hash::{ByteDigest, Digest, Hasher};
pub mod hashers {
    //! Cryptographic hash function implementations.

    pub use super::hash::{Blake3_256, Sha3_256};
}

mod merkle;
pub use merkle::{commit, open, verify, MerkleTree};

mod proof_stream;
pub use proof_stream::{ProofObject, ProofStream};

mod errors;
pub use errors::{MerkleTreeError, ProofStreamError};
