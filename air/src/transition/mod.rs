// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Transition constraints are multivariate polynomials over `1 + 2 * w` variables, where `w` is
//! the number of registers: the domain point `x`, the registers of the current row, and the
//! registers of the next row. A pair of consecutive rows is valid when every constraint
//! evaluates to ZERO.

use math::{FieldElement, MathError, MultivariatePolynomial};

/// Returns the number of variables of transition constraints for a trace of the specified width.
pub fn num_transition_variables(num_registers: usize) -> usize {
    1 + 2 * num_registers
}

/// Returns the variables of transition constraints for a trace of the specified width, split
/// into the domain point `x`, the current row, and the next row.
///
/// This is a convenient starting point for building constraints; for example, for a trace with
/// a single register, `next[0] - current[0] * current[0]` asserts that every value is the square
/// of the previous one.
pub fn transition_variables<E: FieldElement>(
    num_registers: usize,
) -> (MultivariatePolynomial<E>, Vec<MultivariatePolynomial<E>>, Vec<MultivariatePolynomial<E>>) {
    let mut variables = MultivariatePolynomial::variables(num_transition_variables(num_registers));
    let next = variables.split_off(1 + num_registers);
    let current = variables.split_off(1);
    let x = variables.remove(0);
    (x, current, next)
}

/// Evaluates every transition constraint at the point `[x] + current + next`.
///
/// # Errors
/// Returns an error if any of the constraints is defined over a number of variables different
/// from `1 + current.len() + next.len()`.
pub fn evaluate_transition_constraints<E: FieldElement>(
    constraints: &[MultivariatePolynomial<E>],
    x: E,
    current: &[E],
    next: &[E],
) -> Result<Vec<E>, MathError> {
    let mut point = Vec::with_capacity(1 + current.len() + next.len());
    point.push(x);
    point.extend_from_slice(current);
    point.extend_from_slice(next);
    constraints.iter().map(|constraint| constraint.evaluate(&point)).collect()
}
