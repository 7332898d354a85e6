// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use math::{get_power_series_with_offset, StarkField};

// FRI OPTIONS
// ================================================================================================

/// FRI protocol config options for proof generation and verification.
///
/// The evaluation domain of the first round is the coset `offset * <omega>`, where `omega` is a
/// primitive root of unity of order `domain_length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriOptions<E: StarkField> {
    offset: E,
    omega: E,
    domain_length: usize,
    expansion_factor: usize,
    num_colinearity_tests: usize,
}

impl<E: StarkField> FriOptions<E> {
    /// Returns a new [FriOptions] struct instantiated with the specified parameters.
    ///
    /// # Panics
    /// Panics if:
    /// - `domain_length` is not a power of two greater than 1.
    /// - `omega` is not the root of unity of order `domain_length` returned by
    ///   `E::get_root_of_unity()`. Evaluation domains are traversed in the order of FFT twiddles,
    ///   so no other root is accepted.
    /// - `expansion_factor` is not a power of two.
    /// - `num_colinearity_tests` is zero.
    pub fn new(
        offset: E,
        omega: E,
        domain_length: usize,
        expansion_factor: usize,
        num_colinearity_tests: usize,
    ) -> Self {
        assert!(
            domain_length.is_power_of_two() && domain_length > 1,
            "domain length must be a power of two greater than 1, but was {domain_length}"
        );
        assert_eq!(
            omega,
            E::get_root_of_unity(domain_length.ilog2()),
            "omega must be the primitive root of unity of order {domain_length}"
        );
        assert!(
            expansion_factor.is_power_of_two(),
            "expansion factor must be a power of two, but was {expansion_factor}"
        );
        assert!(num_colinearity_tests > 0, "number of colinearity tests must be greater than zero");

        FriOptions {
            offset,
            omega,
            domain_length,
            expansion_factor,
            num_colinearity_tests,
        }
    }

    /// Returns the offset by which the evaluation domain is shifted.
    pub fn offset(&self) -> E {
        self.offset
    }

    /// Returns the generator of the multiplicative subgroup underlying the evaluation domain.
    pub fn omega(&self) -> E {
        self.omega
    }

    /// Returns the number of points in the evaluation domain of the first round.
    pub fn domain_length(&self) -> usize {
        self.domain_length
    }

    /// Returns the ratio between the size of the evaluation domain and the number of
    /// coefficients of the polynomial being tested.
    pub fn expansion_factor(&self) -> usize {
        self.expansion_factor
    }

    /// Returns the number of queries checked in every round.
    pub fn num_colinearity_tests(&self) -> usize {
        self.num_colinearity_tests
    }

    /// Returns the number of commit rounds.
    ///
    /// The codeword is halved for as long as it is longer than the expansion factor and longer
    /// than four times the number of colinearity tests.
    pub fn num_rounds(&self) -> usize {
        let mut codeword_length = self.domain_length;
        let mut num_rounds = 0;
        while codeword_length > self.expansion_factor
            && 4 * self.num_colinearity_tests < codeword_length
        {
            codeword_length /= 2;
            num_rounds += 1;
        }
        num_rounds
    }

    /// Returns the length of the codeword sent in the clear at the end of the commit phase.
    pub fn last_codeword_length(&self) -> usize {
        self.domain_length >> self.num_rounds().saturating_sub(1)
    }

    /// Returns all points of the evaluation domain of the first round: `offset * omega^i`.
    pub fn eval_domain(&self) -> Vec<E> {
        get_power_series_with_offset(self.omega, self.offset, self.domain_length)
    }
}
