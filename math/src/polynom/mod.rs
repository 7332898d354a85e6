// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Basic polynomial operations.
//!
//! This module provides a set of function for basic polynomial operations, including:
//! - Polynomial evaluation using Horner method.
//! - Polynomial interpolation using Lagrange method.
//! - Polynomial addition, subtraction, multiplication, and division.
//! - Construction of zerofiers (vanishing polynomials) for arbitrary sets of points.
//!
//! In the context of this module any slice of field elements is considered to be a polynomial
//! in reverse coefficient form. A few examples:
//!
//! ```
//! # use glacier_math::{fields::f128::BaseElement, FieldElement};
//! // p(x) = 2 * x + 1
//! let p = vec![BaseElement::new(1), BaseElement::new(2)];
//!
//! // p(x) = 4 * x^2 + 3
//! let p = [BaseElement::new(3), BaseElement::ZERO, BaseElement::new(4)];
//! ```
//!
//! The owned [Polynomial] type wraps these functions with operator overloads and keeps its
//! coefficients trimmed, so two polynomials compare equal exactly when they represent the same
//! polynomial.

#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::iter;

use crate::{errors::MathError, field::FieldElement, utils::batch_inversion};

mod polynomial;
pub use polynomial::Polynomial;

#[cfg(test)]
mod tests;

// POLYNOMIAL EVALUATION
// ================================================================================================

/// Evaluates a polynomial at a single point and returns the result.
///
/// Evaluates polynomial `p` at coordinate `x` using
/// [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
///
/// # Examples
/// ```
/// # use glacier_math::polynom::*;
/// # use glacier_math::{fields::f128::BaseElement, FieldElement};
/// // define polynomial: f(x) = 3 * x^2 + 2 * x + 1
/// let p = (1u32..4).map(BaseElement::from).collect::<Vec<_>>();
///
/// // evaluate the polynomial at point 4
/// let x = BaseElement::new(4);
/// assert_eq!(BaseElement::new(57), eval(&p, x));
/// ```
pub fn eval<E: FieldElement>(p: &[E], x: E) -> E {
    // Horner evaluation
    p.iter().rev().fold(E::ZERO, |acc, &coeff| acc * x + coeff)
}

/// Evaluates a polynomial at multiple points and returns a vector of results.
///
/// Evaluates polynomial `p` at all coordinates in `xs` slice by repeatedly invoking
/// `polynom::eval()` function.
///
/// When `concurrent` feature is enabled, the points are evaluated in multiple threads.
pub fn eval_many<E: FieldElement>(p: &[E], xs: &[E]) -> Vec<E> {
    iter!(xs, 256).map(|x| eval(p, *x)).collect()
}

// POLYNOMIAL INTERPOLATION
// ================================================================================================

/// Returns a polynomial in coefficient form interpolated from a set of X and Y coordinates.
///
/// Uses [Lagrange interpolation](https://en.wikipedia.org/wiki/Lagrange_polynomial) to build a
/// polynomial from X and Y coordinates. If `remove_leading_zeros = true`, all leading coefficients
/// which are ZEROs will be truncated; otherwise, the length of result will be equal to the number
/// of X coordinates.
///
/// All Lagrange basis polynomials are derived from a single zerofier over `xs`, and their
/// normalizing denominators are inverted in one batch.
///
/// # Errors
/// Returns an error if:
/// * Number of X and Y coordinates is not the same.
/// * X coordinates contain duplicates.
///
/// # Examples
/// ```
/// # use glacier_math::polynom::*;
/// # use glacier_math::{fields::f128::BaseElement, FieldElement};
/// let xs: Vec<BaseElement> = (0u32..4).map(BaseElement::from).collect();
/// let ys: Vec<BaseElement> = [1u32, 2, 5, 10].into_iter().map(BaseElement::from).collect();
///
/// // f(x) = x^2 + 1
/// let p = interpolate(&xs, &ys, true).unwrap();
/// assert_eq!(vec![BaseElement::ONE, BaseElement::ZERO, BaseElement::ONE], p);
/// ```
pub fn interpolate<E: FieldElement>(
    xs: &[E],
    ys: &[E],
    remove_leading_zeros: bool,
) -> Result<Vec<E>, MathError> {
    if xs.len() != ys.len() {
        return Err(MathError::MismatchedLengths(xs.len(), ys.len()));
    }

    let roots = get_zero_roots(xs);
    let numerators: Vec<Vec<E>> = iter!(xs).map(|&x| syn_div(&roots, x)).collect();

    let denominators: Vec<E> =
        numerators.iter().zip(xs.iter()).map(|(numerator, &x)| eval(numerator, x)).collect();
    // a zero denominator means some other x coordinate equals this one
    if denominators.contains(&E::ZERO) {
        return Err(MathError::DuplicateDomainPoint);
    }
    let denominators = batch_inversion(&denominators);

    let mut result = E::zeroed_vector(xs.len());
    for i in 0..xs.len() {
        if ys[i] == E::ZERO {
            continue;
        }
        let y_slice = ys[i] * denominators[i];
        for (res, &coeff) in result.iter_mut().zip(numerators[i].iter()) {
            *res += coeff * y_slice;
        }
    }

    if remove_leading_zeros {
        Ok(self::remove_leading_zeros(&result))
    } else {
        Ok(result)
    }
}

// POLYNOMIAL MATH OPERATIONS
// ================================================================================================

/// Returns a polynomial resulting from adding two polynomials together.
///
/// Polynomials `a` and `b` are expected to be in the coefficient form, and the returned
/// polynomial will be in the coefficient form as well. The length of the returned vector
/// will be max(a.len(), b.len()).
pub fn add<E: FieldElement>(a: &[E], b: &[E]) -> Vec<E> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut result = long.to_vec();
    for (r, &s) in result.iter_mut().zip(short.iter()) {
        *r += s;
    }
    result
}

/// Returns a polynomial resulting from subtracting one polynomial from another.
///
/// Specifically, subtracts polynomial `b` from polynomial `a` and returns the result. Both
/// polynomials are expected to be in the coefficient form, and the returned polynomial will
/// be in the coefficient form as well. The length of the returned vector will be
/// max(a.len(), b.len()).
pub fn sub<E: FieldElement>(a: &[E], b: &[E]) -> Vec<E> {
    let mut result = a.to_vec();
    if result.len() < b.len() {
        result.resize(b.len(), E::ZERO);
    }
    for (r, &s) in result.iter_mut().zip(b.iter()) {
        *r -= s;
    }
    result
}

/// Returns a polynomial resulting from multiplying two polynomials together.
///
/// Polynomials `a` and `b` are expected to be in the coefficient form, and the returned
/// polynomial will be in the coefficient form as well. The length of the returned vector
/// will be a.len() + b.len() - 1, or zero if either of the inputs is empty.
pub fn mul<E: FieldElement>(a: &[E], b: &[E]) -> Vec<E> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut result = E::zeroed_vector(a.len() + b.len() - 1);
    for (i, &ac) in a.iter().enumerate() {
        if ac == E::ZERO {
            continue;
        }
        for (j, &bc) in b.iter().enumerate() {
            result[i + j] += ac * bc;
        }
    }
    result
}

/// Returns a polynomial resulting from multiplying a given polynomial by a scalar value.
///
/// Specifically, multiplies every coefficient of polynomial `p` by constant `k` and returns
/// the resulting vector.
pub fn mul_by_const<E: FieldElement>(p: &[E], k: E) -> Vec<E> {
    p.iter().map(|&coeff| coeff * k).collect()
}

/// Returns the quotient and remainder of dividing polynomial `a` by polynomial `b`.
///
/// The quotient `q` and the remainder `r` satisfy `a = q * b + r` with the degree of `r`
/// smaller than the degree of `b`. Both results have their leading zeros removed.
///
/// # Errors
/// Returns [MathError::DivisionByZero] if `b` is the zero polynomial.
///
/// # Examples
/// ```
/// # use glacier_math::polynom::*;
/// # use glacier_math::{fields::f128::BaseElement, FieldElement};
/// // p(x) = x^2 + 2 * x + 3
/// let a = [BaseElement::new(3), BaseElement::new(2), BaseElement::ONE];
/// // p(x) = x + 1
/// let b = [BaseElement::ONE, BaseElement::ONE];
///
/// let (quotient, remainder) = div_rem(&a, &b).unwrap();
/// assert_eq!(vec![BaseElement::ONE, BaseElement::ONE], quotient);
/// assert_eq!(vec![BaseElement::new(2)], remainder);
/// ```
pub fn div_rem<E: FieldElement>(a: &[E], b: &[E]) -> Result<(Vec<E>, Vec<E>), MathError> {
    let bpos = degree_of(b).ok_or(MathError::DivisionByZero)?;
    let mut remainder = remove_leading_zeros(a);

    let apos = match degree_of(&remainder) {
        Some(apos) if apos >= bpos => apos,
        _ => return Ok((Vec::new(), remainder)),
    };

    let lead_inv = b[bpos].inv();
    let mut quotient = E::zeroed_vector(apos - bpos + 1);
    for i in (0..quotient.len()).rev() {
        let quot = remainder[i + bpos] * lead_inv;
        quotient[i] = quot;
        if quot == E::ZERO {
            continue;
        }
        for j in 0..=bpos {
            remainder[i + j] -= b[j] * quot;
        }
    }

    remainder.truncate(bpos);
    Ok((remove_leading_zeros(&quotient), remove_leading_zeros(&remainder)))
}

/// Returns a polynomial resulting from dividing a polynomial by a polynomial of the form
/// (x - `b`).
///
/// Uses [synthetic division](https://en.wikipedia.org/wiki/Synthetic_division) method to divide
/// polynomial `p` by polynomial (x - `b`); the remainder of the division is discarded. The
/// returned vector is one element shorter than `p`.
pub fn syn_div<E: FieldElement>(p: &[E], b: E) -> Vec<E> {
    if p.len() < 2 {
        return Vec::new();
    }
    let mut result = E::zeroed_vector(p.len() - 1);
    let mut carry = E::ZERO;
    for i in (1..p.len()).rev() {
        carry = p[i] + carry * b;
        result[i - 1] = carry;
    }
    result
}

// ZEROFIERS
// ================================================================================================

/// Returns a monic polynomial of degree `xs.len()` whose roots are exactly the values in `xs`.
///
/// The polynomial is computed as the product of (x - `x_i`) over all values in `xs`; for empty
/// `xs` the constant polynomial 1 is returned.
///
/// # Examples
/// ```
/// # use glacier_math::polynom::*;
/// # use glacier_math::{fields::f128::BaseElement, FieldElement};
/// let xs = [BaseElement::new(1), BaseElement::new(2)];
///
/// // (x - 1) * (x - 2) = x^2 - 3 * x + 2
/// let z = get_zero_roots(&xs);
/// assert_eq!(vec![BaseElement::new(2), -BaseElement::new(3), BaseElement::ONE], z);
/// ```
pub fn get_zero_roots<E: FieldElement>(xs: &[E]) -> Vec<E> {
    let mut result = Vec::with_capacity(xs.len() + 1);
    result.push(E::ONE);
    for &x in xs {
        // multiply the running product by (x - x_i)
        result.push(E::ZERO);
        for j in (1..result.len()).rev() {
            result[j] = result[j - 1] - x * result[j];
        }
        result[0] = -x * result[0];
    }
    result
}

// DEGREE INFERENCE
// ================================================================================================

/// Returns the degree of the provided polynomial, or `None` for the zero polynomial.
///
/// If the size of the provided slice is much larger than the degree of the polynomial (i.e.,
/// a large number of leading coefficients is ZERO), this operation can be quite inefficient.
pub fn degree_of<E: FieldElement>(poly: &[E]) -> Option<usize> {
    poly.iter().rposition(|&coeff| coeff != E::ZERO)
}

/// Returns a polynomial with all leading ZERO coefficients removed.
pub fn remove_leading_zeros<E: FieldElement>(values: &[E]) -> Vec<E> {
    match degree_of(values) {
        Some(degree) => values[..=degree].to_vec(),
        None => Vec::new(),
    }
}
