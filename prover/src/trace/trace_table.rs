// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use air::{BoundaryConstraint, StarkContext};
use math::{MathError, MultivariatePolynomial, Polynomial, StarkField};
use rand::RngCore;
#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::iter;

use super::validate_trace;
use crate::{draw_random_elements, ProverError};

// TRACE TABLE
// ================================================================================================
/// An execution trace of a computation.
///
/// The trace is a table with one column per register and one row per cycle of the computation.
/// Internally the table is stored column by column, since the prover interpolates every register
/// separately.
///
/// There are two ways to create a trace table. [TraceTable::init()] and
/// [TraceTable::from_rows()] take the values of the trace directly. Alternatively,
/// [TraceTable::new()] allocates a trace of the specified shape filled with ZEROs, which can then
/// be populated via the [fill()](TraceTable::fill) method:
///
/// 1. The first closure is responsible for initializing the first state of the computation (the
///    first row of the execution trace).
/// 2. The second closure receives the previous state of the execution trace as input, and must
///    update it to the next state of the computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceTable<E: StarkField> {
    columns: Vec<Vec<E>>,
}

impl<E: StarkField> TraceTable<E> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Creates a new execution trace of the specified width and length with all cells set to
    /// ZERO.
    ///
    /// # Panics
    /// Panics if either `width` or `length` is zero.
    pub fn new(width: usize, length: usize) -> Self {
        assert!(width > 0, "execution trace must consist of at least one column");
        assert!(length > 0, "execution trace must consist of at least one row");
        Self { columns: vec![E::zeroed_vector(length); width] }
    }

    /// Creates a new execution trace from a list of provided trace columns.
    ///
    /// # Panics
    /// Panics if:
    /// * The `columns` vector is empty.
    /// * The columns are empty or not all of the same length.
    pub fn init(columns: Vec<Vec<E>>) -> Self {
        assert!(!columns.is_empty(), "execution trace must consist of at least one column");
        let trace_length = columns[0].len();
        assert!(trace_length > 0, "execution trace must consist of at least one row");
        for column in columns.iter().skip(1) {
            assert_eq!(column.len(), trace_length, "all columns traces must have the same length");
        }
        Self { columns }
    }

    /// Creates a new execution trace from a list of provided rows.
    ///
    /// # Panics
    /// Panics if `rows` is empty, or if the rows are empty or not all of the same width.
    pub fn from_rows(rows: &[Vec<E>]) -> Self {
        assert!(!rows.is_empty(), "execution trace must consist of at least one row");
        let width = rows[0].len();
        let mut result = Self::new(width, rows.len());
        for (step, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width, "all rows of the trace must have the same width");
            result.update_row(step, row);
        }
        result
    }

    // DATA MUTATORS
    // --------------------------------------------------------------------------------------------

    /// Updates a value in a single cell of the execution trace.
    ///
    /// # Panics
    /// Panics if either `register` or `step` are out of bounds for this execution trace.
    pub fn set(&mut self, register: usize, step: usize, value: E) {
        self.columns[register][step] = value;
    }

    /// Fill all rows in the execution trace.
    ///
    /// The rows are filled by executing the provided closures as follows:
    /// - `init` closure is used to initialize the first row of the trace; it receives a mutable
    ///   reference to the first state initialized to all zeros. The contents of the state are
    ///   copied into the first row of the trace after the closure returns.
    /// - `update` closure is used to populate all subsequent rows of the trace; it receives two
    ///   parameters:
    ///   - index of the last updated row (starting with 0).
    ///   - a mutable reference to the last updated state; the contents of the state are copied into
    ///     the next row of the trace after the closure returns.
    pub fn fill<I, U>(&mut self, init: I, mut update: U)
    where
        I: FnOnce(&mut [E]),
        U: FnMut(usize, &mut [E]),
    {
        let mut state = E::zeroed_vector(self.width());
        init(&mut state);
        self.update_row(0, &state);

        for i in 0..self.length() - 1 {
            update(i, &mut state);
            self.update_row(i + 1, &state);
        }
    }

    /// Updates a single row in the execution trace with provided data.
    pub fn update_row(&mut self, step: usize, state: &[E]) {
        for (column, &value) in self.columns.iter_mut().zip(state) {
            column[step] = value;
        }
    }

    /// Appends `num_rows` rows of values drawn from `rng` to the end of the trace.
    pub(crate) fn append_random_rows<R: RngCore + ?Sized>(&mut self, num_rows: usize, rng: &mut R) {
        for _ in 0..num_rows {
            let row = draw_random_elements::<E, R>(self.width(), rng);
            for (column, value) in self.columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of registers (columns) in this execution trace.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of cycles (rows) in this execution trace.
    pub fn length(&self) -> usize {
        self.columns[0].len()
    }

    /// Returns the entire trace column at the specified index.
    pub fn get_column(&self, register: usize) -> &[E] {
        &self.columns[register]
    }

    /// Returns value of the cell in the specified register at the specified row of this trace.
    pub fn get(&self, register: usize, step: usize) -> E {
        self.columns[register][step]
    }

    /// Returns the row of the trace at the specified step.
    pub fn row(&self, step: usize) -> Vec<E> {
        self.columns.iter().map(|column| column[step]).collect()
    }

    /// Reads a single row from this execution trace into the provided target.
    pub fn read_row_into(&self, step: usize, target: &mut [E]) {
        for (value, column) in target.iter_mut().zip(self.columns.iter()) {
            *value = column[step];
        }
    }

    // VALIDATION
    // --------------------------------------------------------------------------------------------

    /// Checks that this trace has the shape expected by `context`, satisfies all `boundary`
    /// constraints, and that every transition constraint evaluates to ZERO on every pair of
    /// consecutive rows.
    ///
    /// This evaluates every constraint on every row and is therefore expensive.
    ///
    /// # Errors
    /// Returns an error describing the first violated requirement, including constraints which
    /// do not fit `context`.
    pub fn validate(
        &self,
        context: &StarkContext<E>,
        transition_constraints: &[MultivariatePolynomial<E>],
        boundary: &[BoundaryConstraint<E>],
    ) -> Result<(), ProverError> {
        context.validate_transition_constraints(transition_constraints)?;
        context.validate_boundary(boundary)?;
        self.check_shape(context)?;
        validate_trace(self, context, transition_constraints, boundary)
    }

    /// Checks that the number of registers and cycles of this trace match `context`.
    pub(crate) fn check_shape(&self, context: &StarkContext<E>) -> Result<(), ProverError> {
        if self.width() != context.num_registers() {
            return Err(ProverError::TraceWidthMismatch(context.num_registers(), self.width()));
        }
        if self.length() != context.original_trace_length() {
            return Err(ProverError::TraceLengthMismatch(
                context.original_trace_length(),
                self.length(),
            ));
        }
        Ok(())
    }

    // INTERPOLATION
    // --------------------------------------------------------------------------------------------

    /// Interpolates every column of this trace over the specified domain, which must have one
    /// point per row.
    pub(crate) fn interpolate_columns(&self, domain: &[E]) -> Result<Vec<Polynomial<E>>, MathError> {
        iter!(self.columns)
            .map(|column| Polynomial::interpolate_domain(domain, column))
            .collect()
    }
}
