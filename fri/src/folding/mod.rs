// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains functions for folding FRI codewords.
//!
//! This module is exposed publicly primarily for benchmarking and documentation purposes. The
//! functions contained here are not intended to be used by the end-user of the crate.

use math::{batch_inversion, get_power_series_with_offset, StarkField};
#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::{iter_mut, uninit_vector};

// CODEWORD FOLDING
// ================================================================================================

/// Folds a codeword of length N into a codeword of length N / 2.
///
/// Let `codeword` contain evaluations of a polynomial f(x) = g(x^2) + x * h(x^2) over the
/// domain `offset * omega^i`. The folded codeword contains evaluations of
/// f'(x) = g(x) + `alpha` * h(x) over the domain `offset^2 * omega^(2i)`, which is half the
/// size of the original domain. Since `omega^(N/2) = -1`, the values of f at the points x and -x
/// are enough to recover g(x^2) and h(x^2):
///
/// f'(x^2) = 1/2 * ((1 + alpha / x) * f(x) + (1 - alpha / x) * f(-x))
///
/// The example below shows that folding in evaluation form matches folding the coefficients.
/// ```
/// # use glacier_fri::folding::fold_codeword;
/// # use math::{fields::f128::BaseElement, get_power_series_with_offset, polynom, FieldElement, StarkField};
/// # use rand_utils::{rand_value, rand_vector};
/// let alpha: BaseElement = rand_value();
///
/// // degree 7 polynomial f(x) and its folding f'(x) = g(x) + alpha * h(x)
/// let poly: Vec<BaseElement> = rand_vector(8);
/// let folded_poly: Vec<BaseElement> =
///     (0..4).map(|i| poly[2 * i] + alpha * poly[2 * i + 1]).collect();
///
/// let n = 32_usize;
/// let offset = BaseElement::GENERATOR;
/// let omega = BaseElement::get_root_of_unity(n.trailing_zeros());
/// let domain = get_power_series_with_offset(omega, offset, n);
/// let folded_domain = get_power_series_with_offset(omega.square(), offset.square(), n / 2);
///
/// let codeword = polynom::eval_many(&poly, &domain);
/// let folded_codeword = polynom::eval_many(&folded_poly, &folded_domain);
/// assert_eq!(folded_codeword, fold_codeword(&codeword, alpha, offset, omega));
/// ```
pub fn fold_codeword<E: StarkField>(codeword: &[E], alpha: E, offset: E, omega: E) -> Vec<E> {
    let half_length = codeword.len() / 2;
    let domain = get_power_series_with_offset(omega, offset, half_length);
    let inv_domain = batch_inversion(&domain);
    let two_inv = E::ONE.double().inv();

    let mut result = unsafe { uninit_vector(half_length) };
    iter_mut!(result, 1024).enumerate().for_each(|(i, r)| {
        let t = alpha * inv_domain[i];
        *r = two_inv * ((E::ONE + t) * codeword[i] + (E::ONE - t) * codeword[half_length + i]);
    });
    result
}

// TESTS
// ================================================================================================
