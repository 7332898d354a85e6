// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use math::FieldElement;

use crate::ConstraintError;

// BOUNDARY CONSTRAINT
// ================================================================================================
/// An assertion that a register of the execution trace holds a specific value at a specific
/// cycle.
///
/// For example, `BoundaryConstraint::new(0, 1, value)` asserts that the value of register 1 at
/// the first cycle of the trace is `value`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BoundaryConstraint<E: FieldElement> {
    cycle: usize,
    register: usize,
    value: E,
}

impl<E: FieldElement> BoundaryConstraint<E> {
    /// Returns a constraint asserting that `register` holds `value` at `cycle`.
    pub fn new(cycle: usize, register: usize, value: E) -> Self {
        BoundaryConstraint { cycle, register, value }
    }

    /// Returns the cycle (row of the execution trace) against which this constraint is placed.
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Returns the index of the register against which this constraint is placed.
    pub fn register(&self) -> usize {
        self.register
    }

    /// Returns the value the register is expected to hold.
    pub fn value(&self) -> E {
        self.value
    }
}

impl<E: FieldElement> From<(usize, usize, E)> for BoundaryConstraint<E> {
    fn from((cycle, register, value): (usize, usize, E)) -> Self {
        Self::new(cycle, register, value)
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Returns the length of the execution trace implied by the provided boundary constraints, i.e.
/// one more than the last constrained cycle.
///
/// # Errors
/// Returns an error if `boundary` is empty or if the last constrained cycle is `usize::MAX`.
pub fn implied_trace_length<E: FieldElement>(
    boundary: &[BoundaryConstraint<E>],
) -> Result<usize, ConstraintError> {
    let last_cycle = boundary
        .iter()
        .map(|constraint| constraint.cycle)
        .max()
        .ok_or(ConstraintError::NoBoundaryConstraints)?;
    last_cycle.checked_add(1).ok_or(ConstraintError::CycleOutOfBounds(last_cycle))
}

/// Returns (cycle, value) pairs of all constraints placed against the specified register, in the
/// order in which they appear in `boundary`.
pub fn register_points<E: FieldElement>(
    boundary: &[BoundaryConstraint<E>],
    register: usize,
) -> Vec<(usize, E)> {
    boundary
        .iter()
        .filter(|constraint| constraint.register == register)
        .map(|constraint| (constraint.cycle, constraint.value))
        .collect()
}
