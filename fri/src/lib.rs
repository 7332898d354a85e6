// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains an implementation of the FRI protocol used by the Glacier STARK prover
//! and verifier.
//!
//! FRI stands for Fast Reed-Solomon Interactive Oracle Proof of Proximity, and is used in the
//! STARK protocol for low-degree testing. Specifically, given a commitment to a set of
//! evaluations of some function over a coset of a multiplicative subgroup, the verifier can be
//! convinced that the function is a polynomial of degree at most
//! `domain_length / expansion_factor - 1`.
//!
//! # Protocol
//! The protocol is split into the commit phase and the query phase; both communicate with the
//! verifier exclusively through a [ProofStream](crypto::ProofStream), and all verifier
//! randomness is derived from the stream via the Fiat-Shamir heuristic.
//!
//! During the commit phase, the prover commits to the current codeword with a Merkle tree,
//! draws a challenge `alpha` from the transcript, and folds the codeword into one of half the
//! length whose implied polynomial has half the degree. This is repeated for
//! [FriOptions::num_rounds()] rounds; the codeword of the last round is sent in the clear.
//!
//! During the query phase, the prover samples a set of indices from the transcript and, for
//! every round, opens the two points of the current codeword which fold into a single point of
//! the next codeword. The verifier checks that the three values are colinear with the folding
//! challenge, authenticates all of them against the round commitments, and checks the degree of
//! the final codeword directly.

pub mod folding;

mod prover;
pub use prover::FriProver;

mod verifier;
pub use verifier::FriVerifier;

mod options;
pub use options::FriOptions;

mod errors;
pub use errors::FriError;

mod utils;
pub use utils::{sample_index, sample_indices};
