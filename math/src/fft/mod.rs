// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! FFT-based polynomial evaluation and interpolation.
//!
//! Functions in this module can be used to evaluate and interpolate polynomials over domains
//! which are multiplicative subgroups of finite fields (or cosets of such subgroups) and have
//! lengths equal to powers of two. As compared to evaluation and interpolation functions
//! available in the `polynom` module, these functions are much more efficient: their runtime
//! complexity is O(`n` log `n`), where `n` is the domain size.
//!
//! The root of unity used for a domain of size `n` is `E::get_root_of_unity(n.ilog2())`, which is
//! the same element as `E::primitive_nth_root(n)`; thus, the i-th evaluation produced here
//! corresponds to the point `offset * omega^i` for `omega = E::primitive_nth_root(n)`.

use crate::{field::StarkField, utils::get_power_series};

mod serial;


// POLYNOMIAL EVALUATION
// ================================================================================================

/// Evaluates a polynomial on all points of the specified (shifted) domain using the FFT
/// algorithm.
///
/// The domain has `p.len()` * `blowup_factor` points, and every point of the subgroup of that
/// size is multiplied by `domain_offset`. The `twiddles` must be obtained for domain size
/// `p.len()`.
///
/// # Panics
/// Panics if:
/// * Length of `p` is not a power of two or is smaller than 2.
/// * `blowup_factor` is not a power of two.
/// * Length of `twiddles` is not `p.len()` / 2.
/// * The field does not contain a multiplicative subgroup of size `p.len()` * `blowup_factor`.
/// * `domain_offset` is ZERO.
pub fn evaluate_poly_with_offset<E: StarkField>(
    p: &[E],
    twiddles: &[E],
    domain_offset: E,
    blowup_factor: usize,
) -> Vec<E> {
    check_domain_size::<E>(p.len());
    assert!(blowup_factor.is_power_of_two(), "blowup factor must be a power of 2");
    assert_eq!(
        p.len(),
        twiddles.len() * 2,
        "invalid number of twiddles: expected {} but received {}",
        p.len() / 2,
        twiddles.len()
    );
    check_domain_size::<E>(p.len() * blowup_factor);
    assert_ne!(domain_offset, E::ZERO, "domain offset cannot be zero");

    serial::evaluate_poly_with_offset(p, twiddles, domain_offset, blowup_factor)
}

/// Evaluates a polynomial given by its coefficients over the coset `offset * <omega>` where
/// `omega` generates the subgroup of size `domain_size`.
///
/// Unlike the other evaluation functions, `p` may have any length up to `domain_size`; missing
/// coefficients are treated as ZEROs.
///
/// # Panics
/// Panics if `domain_size` is not a power of two greater than 1, if `p` is longer than
/// `domain_size`, or if `offset` is ZERO.
pub fn evaluate_poly_on_coset<E: StarkField>(p: &[E], domain_size: usize, offset: E) -> Vec<E> {
    assert!(
        p.len() <= domain_size,
        "polynomial with {} coefficients cannot be evaluated over a domain of size {}",
        p.len(),
        domain_size
    );
    let mut coefficients = E::zeroed_vector(domain_size);
    coefficients[..p.len()].copy_from_slice(p);
    let twiddles = get_twiddles::<E>(domain_size);
    evaluate_poly_with_offset(&coefficients, &twiddles, offset, 1)
}

// POLYNOMIAL INTERPOLATION
// ================================================================================================

/// Interpolates evaluations of a polynomial over the specified (shifted) domain into a
/// polynomial in coefficient form using the FFT algorithm.
///
/// # Panics
/// Panics if:
/// * Length of `evaluations` is not a power of two or is smaller than 2.
/// * Length of `inv_twiddles` is not `evaluations.len()` / 2.
/// * The field does not contain a multiplicative subgroup of size `evaluations.len()`.
/// * `domain_offset` is ZERO.
///
/// # Examples
/// ```
/// # use glacier_math::{polynom, fft::*, get_power_series};
/// # use glacier_math::{fields::f128::BaseElement, FieldElement, StarkField};
/// # use rand_utils::rand_vector;
/// let n = 256;
/// let offset = BaseElement::GENERATOR;
///
/// // build a random polynomial
/// let p: Vec<BaseElement> = rand_vector(n);
///
/// // evaluate the polynomial over the shifted domain using regular polynomial evaluation
/// let g = BaseElement::get_root_of_unity(n.ilog2());
/// let domain = get_power_series(g, n);
/// let shifted_domain = domain.iter().map(|&x| x * offset).collect::<Vec<_>>();
/// let mut ys = polynom::eval_many(&p, &shifted_domain);
///
/// // interpolate the evaluations into a polynomial
/// let inv_twiddles = get_inv_twiddles::<BaseElement>(ys.len());
/// interpolate_poly_with_offset(&mut ys, &inv_twiddles, offset);
///
/// assert_eq!(p, ys);
/// ```
pub fn interpolate_poly_with_offset<E: StarkField>(
    evaluations: &mut [E],
    inv_twiddles: &[E],
    domain_offset: E,
) {
    check_domain_size::<E>(evaluations.len());
    assert_eq!(
        evaluations.len(),
        inv_twiddles.len() * 2,
        "invalid number of twiddles: expected {} but received {}",
        evaluations.len() / 2,
        inv_twiddles.len()
    );
    assert_ne!(domain_offset, E::ZERO, "domain offset cannot be zero");
    serial::interpolate_poly_with_offset(evaluations, inv_twiddles, domain_offset);
}

// TWIDDLES
// ================================================================================================

/// Returns a set of twiddles for the specified domain size.
///
/// These twiddles can then be used for FFT-based polynomial evaluation. The length of the
/// returned vector will be equal to `domain_size` / 2.
///
/// # Panics
/// Panics if `domain_size` is not a power of two, or if the field does not contain a
/// multiplicative subgroup of size `domain_size`.
pub fn get_twiddles<E: StarkField>(domain_size: usize) -> Vec<E> {
    check_domain_size::<E>(domain_size);
    let root = E::get_root_of_unity(domain_size.ilog2());
    let mut twiddles = get_power_series(root, domain_size / 2);
    serial::permute(&mut twiddles);
    twiddles
}

/// Returns a set of inverse twiddles for the specified domain size.
///
/// These twiddles can then be used for FFT-based polynomial interpolation. The length of the
/// returned vector will be equal to `domain_size` / 2.
///
/// # Panics
/// Panics if `domain_size` is not a power of two, or if the field does not contain a
/// multiplicative subgroup of size `domain_size`.
pub fn get_inv_twiddles<E: StarkField>(domain_size: usize) -> Vec<E> {
    check_domain_size::<E>(domain_size);
    let root = E::get_root_of_unity(domain_size.ilog2());
    let mut inv_twiddles = get_power_series(root.inv(), domain_size / 2);
    serial::permute(&mut inv_twiddles);
    inv_twiddles
}

// PERMUTATIONS
// ================================================================================================

/// Computes bit reverse of the specified index in the domain of the specified size.
///
/// Domain size is assumed to be a power of two and index must be smaller than domain size.
pub fn permute_index(size: usize, index: usize) -> usize {
    const USIZE_BITS: u32 = 0_usize.count_zeros();

    debug_assert!(index < size);
    debug_assert!(size.is_power_of_two());

    let bits = size.trailing_zeros();
    index.reverse_bits().wrapping_shr(USIZE_BITS - bits)
}

// HELPER FUNCTIONS
// ================================================================================================

fn check_domain_size<E: StarkField>(domain_size: usize) {
    assert!(
        domain_size.is_power_of_two() && domain_size > 1,
        "domain size must be a power of 2 greater than 1, but was {domain_size}"
    );
    assert!(
        domain_size.ilog2() <= E::TWO_ADICITY,
        "multiplicative subgroup of size {domain_size} does not exist in the specified field"
    );
}
