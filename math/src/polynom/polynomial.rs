// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

use super::{add, degree_of, div_rem, eval, eval_many, get_zero_roots, interpolate, mul, sub};
use crate::{errors::MathError, field::FieldElement};

// POLYNOMIAL
// ================================================================================================

/// A univariate polynomial over a field.
///
/// Coefficients are stored in ascending order of degree with all leading ZERO coefficients
/// removed. Thus, the zero polynomial has no coefficients and its degree is `None`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Polynomial<E: FieldElement> {
    coefficients: Vec<E>,
}

impl<E: FieldElement> Polynomial<E> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a polynomial with the specified coefficients listed from the lowest degree up.
    pub fn new(mut coefficients: Vec<E>) -> Self {
        let len = degree_of(&coefficients).map_or(0, |degree| degree + 1);
        coefficients.truncate(len);
        Self { coefficients }
    }

    /// Returns the zero polynomial.
    pub fn zero() -> Self {
        Self { coefficients: Vec::new() }
    }

    /// Returns a constant polynomial.
    pub fn constant(value: E) -> Self {
        Self::new(vec![value])
    }

    /// Returns the polynomial p(x) = x.
    pub fn x() -> Self {
        Self::monomial(1, E::ONE)
    }

    /// Returns the polynomial p(x) = `coefficient` * x^`degree`.
    pub fn monomial(degree: usize, coefficient: E) -> Self {
        let mut coefficients = E::zeroed_vector(degree + 1);
        coefficients[degree] = coefficient;
        Self::new(coefficients)
    }

    /// Returns a polynomial of the smallest degree passing through all (`domain[i]`,
    /// `values[i]`) points.
    ///
    /// # Errors
    /// Returns an error if `domain` and `values` have different lengths, or if `domain`
    /// contains duplicate points.
    pub fn interpolate_domain(domain: &[E], values: &[E]) -> Result<Self, MathError> {
        interpolate(domain, values, true).map(Self::new)
    }

    /// Returns the monic polynomial which vanishes exactly on the provided points.
    pub fn zerofier_domain(points: &[E]) -> Self {
        Self::new(get_zero_roots(points))
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the coefficients of this polynomial from the lowest degree up.
    pub fn coefficients(&self) -> &[E] {
        &self.coefficients
    }

    /// Consumes this polynomial and returns its coefficients.
    pub fn into_coefficients(self) -> Vec<E> {
        self.coefficients
    }

    /// Returns the degree of this polynomial, or `None` if this is the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Returns the coefficient of the highest degree term, or ZERO for the zero polynomial.
    pub fn leading_coefficient(&self) -> E {
        self.coefficients.last().copied().unwrap_or(E::ZERO)
    }

    // EVALUATION
    // --------------------------------------------------------------------------------------------

    /// Evaluates this polynomial at `x`.
    pub fn evaluate(&self, x: E) -> E {
        eval(&self.coefficients, x)
    }

    /// Evaluates this polynomial at every point of `domain`.
    pub fn evaluate_domain(&self, domain: &[E]) -> Vec<E> {
        eval_many(&self.coefficients, domain)
    }

    // ARITHMETIC
    // --------------------------------------------------------------------------------------------

    /// Returns the quotient and the remainder of dividing this polynomial by `denominator`.
    ///
    /// # Errors
    /// Returns an error if `denominator` is the zero polynomial.
    pub fn divide(&self, denominator: &Self) -> Result<(Self, Self), MathError> {
        let (quotient, remainder) = div_rem(&self.coefficients, &denominator.coefficients)?;
        Ok((Self::new(quotient), Self::new(remainder)))
    }

    /// Returns the quotient of dividing this polynomial by `denominator`, requiring the division
    /// to leave no remainder.
    ///
    /// # Errors
    /// Returns an error if `denominator` is the zero polynomial, or if the remainder is not
    /// zero; in the latter case the error carries the degree of the remainder.
    pub fn exact_div(&self, denominator: &Self) -> Result<Self, MathError> {
        let (quotient, remainder) = self.divide(denominator)?;
        match remainder.degree() {
            None => Ok(quotient),
            Some(degree) => Err(MathError::ExactDivisionFailure(degree)),
        }
    }

    /// Returns this polynomial with every coefficient multiplied by `k`.
    pub fn mul_by_const(&self, k: E) -> Self {
        Self::new(super::mul_by_const(&self.coefficients, k))
    }

    /// Returns p(`factor` * x), i.e. the i-th coefficient multiplied by `factor`^i.
    pub fn scale(&self, factor: E) -> Self {
        let mut power = E::ONE;
        let coefficients = self
            .coefficients
            .iter()
            .map(|&coeff| {
                let result = coeff * power;
                power *= factor;
                result
            })
            .collect();
        Self::new(coefficients)
    }

    /// Returns this polynomial raised to the specified power; p^0 = 1 for any p.
    pub fn pow(&self, exponent: usize) -> Self {
        let mut result = Self::constant(E::ONE);
        let mut base = self.clone();
        let mut exponent = exponent;
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = &result * &base;
            }
            exponent >>= 1;
            if exponent > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// Returns the composition p(q(x)) where p is this polynomial.
    pub fn compose(&self, other: &Self) -> Self {
        self.coefficients.iter().rev().fold(Self::zero(), |acc, &coeff| {
            &(&acc * other) + &Self::constant(coeff)
        })
    }

    // COLINEARITY
    // --------------------------------------------------------------------------------------------

    /// Returns true if all of the provided points lie on a single line.
    ///
    /// Points with repeated x coordinates are never considered to be colinear.
    pub fn test_colinearity(points: &[(E, E)]) -> bool {
        let (domain, values): (Vec<E>, Vec<E>) = points.iter().copied().unzip();
        match Self::interpolate_domain(&domain, &values) {
            Ok(poly) => poly.degree().map_or(true, |degree| degree <= 1),
            Err(_) => false,
        }
    }
}

impl<E: FieldElement> fmt::Debug for Polynomial<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.coefficients.iter()).finish()
    }
}

impl<E: FieldElement> From<Vec<E>> for Polynomial<E> {
    fn from(coefficients: Vec<E>) -> Self {
        Self::new(coefficients)
    }
}

// OPERATOR OVERLOADS
// ================================================================================================

impl<E: FieldElement> Add for &Polynomial<E> {
    type Output = Polynomial<E>;

    fn add(self, rhs: Self) -> Polynomial<E> {
        Polynomial::new(add(&self.coefficients, &rhs.coefficients))
    }
}

impl<E: FieldElement> Add for Polynomial<E> {
    type Output = Polynomial<E>;

    fn add(self, rhs: Self) -> Polynomial<E> {
        &self + &rhs
    }
}

impl<E: FieldElement> Sub for &Polynomial<E> {
    type Output = Polynomial<E>;

    fn sub(self, rhs: Self) -> Polynomial<E> {
        Polynomial::new(sub(&self.coefficients, &rhs.coefficients))
    }
}

impl<E: FieldElement> Sub for Polynomial<E> {
    type Output = Polynomial<E>;

    fn sub(self, rhs: Self) -> Polynomial<E> {
        &self - &rhs
    }
}

impl<E: FieldElement> Mul for &Polynomial<E> {
    type Output = Polynomial<E>;

    fn mul(self, rhs: Self) -> Polynomial<E> {
        Polynomial::new(mul(&self.coefficients, &rhs.coefficients))
    }
}

impl<E: FieldElement> Mul for Polynomial<E> {
    type Output = Polynomial<E>;

    fn mul(self, rhs: Self) -> Polynomial<E> {
        &self * &rhs
    }
}

impl<E: FieldElement> Neg for &Polynomial<E> {
    type Output = Polynomial<E>;

    fn neg(self) -> Polynomial<E> {
        Polynomial { coefficients: self.coefficients.iter().map(|&c| -c).collect() }
    }
}

impl<E: FieldElement> Neg for Polynomial<E> {
    type Output = Polynomial<E>;

    fn neg(self) -> Polynomial<E> {
        -&self
    }
}
