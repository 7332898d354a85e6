// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use air::{transition::evaluate_transition_constraints, BoundaryConstraint, StarkContext};
use math::{MultivariatePolynomial, StarkField};

use super::TraceTable;
use crate::ProverError;

// TRACE VALIDATION
// ================================================================================================

/// Checks if an execution trace is valid against the specified constraints.
///
/// The trace is expected to have the shape described by `context`. Transition constraints are
/// evaluated at `[x] + current_row + next_row`, where `x` is the point of the trace domain
/// which corresponds to the current row.
pub fn validate_trace<E: StarkField>(
    trace: &TraceTable<E>,
    context: &StarkContext<E>,
    transition_constraints: &[MultivariatePolynomial<E>],
    boundary: &[BoundaryConstraint<E>],
) -> Result<(), ProverError> {
    // --- 1. make sure the boundary constraints are satisfied -----------------------------------
    for constraint in boundary {
        if constraint.value() != trace.get(constraint.register(), constraint.cycle()) {
            return Err(ProverError::UnsatisfiedBoundaryConstraint(
                constraint.cycle(),
                constraint.register(),
            ));
        }
    }

    // --- 2. make sure this trace satisfies all transition constraints ---------------------------
    let mut x = E::ONE;
    let mut current = E::zeroed_vector(trace.width());
    let mut next = E::zeroed_vector(trace.width());

    for step in 0..trace.length() - 1 {
        trace.read_row_into(step, &mut current);
        trace.read_row_into(step + 1, &mut next);

        let evaluations = evaluate_transition_constraints(transition_constraints, x, &current, &next)?;
        if let Some(index) = evaluations.iter().position(|&evaluation| evaluation != E::ZERO) {
            return Err(ProverError::UnsatisfiedTransitionConstraint(index, step));
        }

        // update x coordinate of the domain
        x *= context.omicron();
    }

    Ok(())
}
