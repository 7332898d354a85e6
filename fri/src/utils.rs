// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crypto::{Digest, Hasher};

// QUERY SAMPLING
// ================================================================================================

/// Interprets `bytes` as a big-endian integer and reduces it modulo `size`.
///
/// # Panics
/// Panics if `size` is zero.
pub fn sample_index(bytes: &[u8], size: usize) -> usize {
    assert!(size > 0, "cannot sample an index from an empty range");
    let size = size as u128;
    let acc = bytes.iter().fold(0u128, |acc, &byte| ((acc << 8) | byte as u128) % size);
    acc as usize
}

/// Derives `number` pseudo-random indices in the range [0, `size`) from `seed`.
///
/// Candidate indices are drawn from `H(seed || counter)` for increasing counters; a candidate is
/// accepted only if its residue modulo `reduced_size` has not been seen before, so that no two
/// accepted indices collapse onto the same point of the last FRI codeword.
///
/// # Panics
/// Panics if `number` is greater than `reduced_size`, or if `reduced_size` is zero.
pub fn sample_indices<H: Hasher>(
    seed: H::Digest,
    size: usize,
    reduced_size: usize,
    number: usize,
) -> Vec<usize> {
    assert!(reduced_size > 0, "reduced size must be greater than zero");
    assert!(
        number <= reduced_size,
        "cannot sample {number} indices with distinct residues modulo {reduced_size}"
    );

    let mut indices = Vec::with_capacity(number);
    let mut reduced_indices = Vec::with_capacity(number);
    let mut counter = 0u64;
    while indices.len() < number {
        let index = sample_index(&H::merge_with_int(seed, counter).as_bytes(), size);
        let reduced_index = index % reduced_size;
        counter += 1;
        if !reduced_indices.contains(&reduced_index) {
            indices.push(index);
            reduced_indices.push(reduced_index);
        }
    }
    indices
}

// TESTS
// ================================================================================================
