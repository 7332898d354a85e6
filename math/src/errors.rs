// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt;

// MATH ERROR
// ================================================================================================

/// Defines errors which can occur during field and polynomial arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// A field element or a polynomial was divided by zero.
    DivisionByZero,
    /// A polynomial division expected to be exact left a non-zero remainder of the given degree.
    ExactDivisionFailure(usize),
    /// Two inputs expected to have the same length did not; (expected, actual).
    MismatchedLengths(usize, usize),
    /// An interpolation domain contained the same point more than once.
    DuplicateDomainPoint,
    /// The field has no primitive root of unity of the requested order.
    InvalidRootOrder(u128),
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => {
                write!(f, "division by zero")
            }
            Self::ExactDivisionFailure(degree) => {
                write!(f, "division is not exact: remainder has degree {degree}")
            }
            Self::MismatchedLengths(expected, actual) => {
                write!(f, "expected {expected} values, but received {actual}")
            }
            Self::DuplicateDomainPoint => {
                write!(f, "interpolation domain points must be distinct")
            }
            Self::InvalidRootOrder(order) => {
                write!(f, "field does not contain a primitive root of unity of order {order}")
            }
        }
    }
}

impl std::error::Error for MathError {}
