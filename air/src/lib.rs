// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains components needed to describe computations in a STARK-specific format, as
//! well as the protocol parameters shared by the Glacier prover and verifier.
//!
//! A computation is described by an execution trace of `w` registers (columns) and `T` cycles
//! (rows), together with two kinds of constraints:
//!
//! * Transition constraints are multivariate polynomials over `1 + 2 * w` variables (the domain
//!   point, the current row, and the next row) which must evaluate to ZERO on every pair of
//!   consecutive rows. See the [transition] module.
//! * [BoundaryConstraint]s assert that a register holds a given value at a given cycle.
//!
//! [StarkOptions] define the security parameters of the protocol, and [StarkContext] derives
//! from them (and the shape of the trace) everything the prover and the verifier must agree on:
//! evaluation domains, FRI options, zerofiers, interpolants, and degree bounds of all quotients.

mod boundary;
pub use boundary::{implied_trace_length, BoundaryConstraint};

pub mod transition;

mod context;
pub use context::{sample_weights, StarkContext};

mod errors;
pub use errors::{ConfigurationError, ConstraintError};

mod options;
pub use options::StarkOptions;
