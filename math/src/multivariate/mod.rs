// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Sparse multivariate polynomials.
//!
//! Transition constraints are expressed as multivariate polynomials over `1 + 2 * w` variables:
//! the domain point `x`, followed by the `w` registers of the current row and the `w` registers
//! of the next row. Such polynomials are evaluated either at concrete points (by the verifier),
//! or symbolically at univariate polynomials (by the prover).

use core::ops::{Add, Mul, Neg, Sub};
use std::collections::{btree_map::Entry, BTreeMap};

use crate::{errors::MathError, field::FieldElement, polynom::Polynomial};


// MULTIVARIATE POLYNOMIAL
// ================================================================================================

/// A multivariate polynomial in sparse form.
///
/// Every term is keyed by its exponent vector, which has one entry per variable; terms with ZERO
/// coefficients are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultivariatePolynomial<E: FieldElement> {
    num_variables: usize,
    terms: BTreeMap<Vec<usize>, E>,
}

impl<E: FieldElement> MultivariatePolynomial<E> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns the zero polynomial in the specified number of variables.
    pub fn zero(num_variables: usize) -> Self {
        Self { num_variables, terms: BTreeMap::new() }
    }

    /// Returns a constant polynomial in the specified number of variables.
    pub fn constant(num_variables: usize, value: E) -> Self {
        Self::from_terms(num_variables, [(vec![0; num_variables], value)])
    }

    /// Returns one polynomial per variable, where the i-th polynomial is p(x_0, ...) = x_i.
    pub fn variables(num_variables: usize) -> Vec<Self> {
        (0..num_variables)
            .map(|i| {
                let mut exponents = vec![0; num_variables];
                exponents[i] = 1;
                Self::from_terms(num_variables, [(exponents, E::ONE)])
            })
            .collect()
    }

    /// Lifts a univariate polynomial into a multivariate polynomial in `variable_index + 1`
    /// variables, in which it depends only on the variable at `variable_index`.
    pub fn lift(polynomial: &Polynomial<E>, variable_index: usize) -> Self {
        let num_variables = variable_index + 1;
        let terms = polynomial.coefficients().iter().enumerate().map(|(power, &coeff)| {
            let mut exponents = vec![0; num_variables];
            exponents[variable_index] = power;
            (exponents, coeff)
        });
        Self::from_terms(num_variables, terms)
    }

    /// Builds a polynomial from (exponents, coefficient) pairs.
    ///
    /// Coefficients of repeated exponent vectors are summed up, and exponent vectors shorter
    /// than `num_variables` are padded with zeros.
    ///
    /// # Panics
    /// Panics if an exponent vector is longer than `num_variables`.
    pub fn from_terms<I>(num_variables: usize, terms: I) -> Self
    where
        I: IntoIterator<Item = (Vec<usize>, E)>,
    {
        let mut result = Self::zero(num_variables);
        for (mut exponents, coeff) in terms {
            assert!(
                exponents.len() <= num_variables,
                "term has {} exponents, but the polynomial has only {} variables",
                exponents.len(),
                num_variables
            );
            exponents.resize(num_variables, 0);
            result.add_term(exponents, coeff);
        }
        result
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of variables of this polynomial.
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Returns an iterator over the (exponents, coefficient) pairs of all nonzero terms.
    pub fn terms(&self) -> impl Iterator<Item = (&[usize], E)> + '_ {
        self.terms.iter().map(|(exponents, &coeff)| (exponents.as_slice(), coeff))
    }

    /// Returns true if this polynomial has no nonzero terms.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    // ARITHMETIC
    // --------------------------------------------------------------------------------------------

    /// Returns this polynomial raised to the specified power; p^0 = 1 for any p.
    pub fn pow(&self, exponent: usize) -> Self {
        let mut result = Self::constant(self.num_variables, E::ONE);
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

    // EVALUATION
    // --------------------------------------------------------------------------------------------

    /// Evaluates this polynomial at the specified point.
    ///
    /// # Errors
    /// Returns an error if the number of coordinates in `point` differs from the number of
    /// variables of this polynomial.
    pub fn evaluate(&self, point: &[E]) -> Result<E, MathError> {
        if point.len() != self.num_variables {
            return Err(MathError::MismatchedLengths(self.num_variables, point.len()));
        }

        let mut result = E::ZERO;
        for (exponents, &coeff) in self.terms.iter() {
            let mut product = coeff;
            for (&x, &power) in point.iter().zip(exponents.iter()) {
                product *= x.exp((power as u64).into());
            }
            result += product;
        }
        Ok(result)
    }

    /// Evaluates this polynomial at a vector of univariate polynomials, returning the
    /// univariate polynomial p(q_0(x), q_1(x), ...).
    ///
    /// Powers of every `point[i]` are computed once and shared across all terms.
    ///
    /// # Errors
    /// Returns an error if the number of polynomials in `point` differs from the number of
    /// variables of this polynomial.
    pub fn evaluate_symbolic(&self, point: &[Polynomial<E>]) -> Result<Polynomial<E>, MathError> {
        if point.len() != self.num_variables {
            return Err(MathError::MismatchedLengths(self.num_variables, point.len()));
        }

        let mut power_cache: Vec<Vec<Polynomial<E>>> =
            point.iter().map(|p| vec![Polynomial::constant(E::ONE), p.clone()]).collect();

        let mut result = Polynomial::zero();
        for (exponents, &coeff) in self.terms.iter() {
            let mut product = Polynomial::constant(coeff);
            for (i, &power) in exponents.iter().enumerate() {
                if power == 0 {
                    continue;
                }
                let powers = &mut power_cache[i];
                while powers.len() <= power {
                    let next = &powers[powers.len() - 1] * &point[i];
                    powers.push(next);
                }
                product = &product * &powers[power];
            }
            result = &result + &product;
        }
        Ok(result)
    }

    /// Returns an upper bound on the degree of the univariate polynomial obtained by symbolically
    /// evaluating this polynomial at polynomials with the specified degrees.
    ///
    /// The bound is the maximum over all terms of sum(exponent_i * bound_i); the zero polynomial
    /// has bound 0.
    pub fn degree_bound(&self, variable_degree_bounds: &[usize]) -> usize {
        self.terms
            .keys()
            .map(|exponents| {
                exponents.iter().zip(variable_degree_bounds.iter()).map(|(&e, &b)| e * b).sum()
            })
            .max()
            .unwrap_or(0)
    }

    // HELPER METHODS
    // --------------------------------------------------------------------------------------------

    fn add_term(&mut self, exponents: Vec<usize>, coeff: E) {
        match self.terms.entry(exponents) {
            Entry::Vacant(entry) => {
                if coeff != E::ZERO {
                    entry.insert(coeff);
                }
            },
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += coeff;
                if *entry.get() == E::ZERO {
                    entry.remove();
                }
            },
        }
    }

    /// Pads exponent vectors of both operands to a common number of variables.
    fn aligned(&self, other: &Self) -> (Self, Self) {
        let num_variables = self.num_variables.max(other.num_variables);
        (self.padded(num_variables), other.padded(num_variables))
    }

    fn padded(&self, num_variables: usize) -> Self {
        if num_variables == self.num_variables {
            return self.clone();
        }
        Self::from_terms(num_variables, self.terms.iter().map(|(k, &v)| (k.clone(), v)))
    }
}

// OPERATOR OVERLOADS
// ================================================================================================

impl<E: FieldElement> Add for &MultivariatePolynomial<E> {
    type Output = MultivariatePolynomial<E>;

    fn add(self, rhs: Self) -> MultivariatePolynomial<E> {
        let (mut result, rhs) = self.aligned(rhs);
        for (exponents, coeff) in rhs.terms {
            result.add_term(exponents, coeff);
        }
        result
    }
}

impl<E: FieldElement> Add for MultivariatePolynomial<E> {
    type Output = MultivariatePolynomial<E>;

    fn add(self, rhs: Self) -> MultivariatePolynomial<E> {
        &self + &rhs
    }
}

impl<E: FieldElement> Sub for &MultivariatePolynomial<E> {
    type Output = MultivariatePolynomial<E>;

    fn sub(self, rhs: Self) -> MultivariatePolynomial<E> {
        self + &(-rhs)
    }
}

impl<E: FieldElement> Sub for MultivariatePolynomial<E> {
    type Output = MultivariatePolynomial<E>;

    fn sub(self, rhs: Self) -> MultivariatePolynomial<E> {
        &self - &rhs
    }
}

impl<E: FieldElement> Mul for &MultivariatePolynomial<E> {
    type Output = MultivariatePolynomial<E>;

    fn mul(self, rhs: Self) -> MultivariatePolynomial<E> {
        let (lhs, rhs) = self.aligned(rhs);
        let mut result = MultivariatePolynomial::zero(lhs.num_variables);
        for (lhs_exponents, &lhs_coeff) in lhs.terms.iter() {
            for (rhs_exponents, &rhs_coeff) in rhs.terms.iter() {
                let exponents =
                    lhs_exponents.iter().zip(rhs_exponents.iter()).map(|(a, b)| a + b).collect();
                result.add_term(exponents, lhs_coeff * rhs_coeff);
            }
        }
        result
    }
}

impl<E: FieldElement> Mul for MultivariatePolynomial<E> {
    type Output = MultivariatePolynomial<E>;

    fn mul(self, rhs: Self) -> MultivariatePolynomial<E> {
        &self * &rhs
    }
}

impl<E: FieldElement> Neg for &MultivariatePolynomial<E> {
    type Output = MultivariatePolynomial<E>;

    fn neg(self) -> MultivariatePolynomial<E> {
        MultivariatePolynomial {
            num_variables: self.num_variables,
            terms: self.terms.iter().map(|(k, &v)| (k.clone(), -v)).collect(),
        }
    }
}

impl<E: FieldElement> Neg for MultivariatePolynomial<E> {
    type Output = MultivariatePolynomial<E>;

    fn neg(self) -> MultivariatePolynomial<E> {
        -&self
    }
}
