// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt;

use math::MathError;

// CONFIGURATION ERROR
// ================================================================================================
/// Represents an error returned during validation of STARK parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// This error occurs when the field modulus has fewer bits than the requested security level;
    /// (modulus bits, security level).
    FieldTooSmall(u32, usize),
    /// This error occurs when the expansion factor is not a power of two.
    ExpansionFactorNotPowerOfTwo(usize),
    /// This error occurs when the expansion factor is smaller than the minimum allowed.
    ExpansionFactorTooSmall(usize, usize),
    /// This error occurs when the number of colinearity checks is less than half of the security
    /// level; (number of checks, security level).
    TooFewColinearityChecks(usize, usize),
    /// This error occurs when the execution trace has no registers.
    NoRegisters,
    /// This error occurs when the execution trace has no cycles.
    EmptyTrace,
    /// This error occurs when the declared degree of transition constraints is zero.
    ConstraintDegreeTooSmall,
    /// This error occurs when the field does not contain the roots of unity needed to build the
    /// evaluation domains.
    DomainTooLarge(MathError),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldTooSmall(bits, security_level) => {
                write!(f, "field modulus must have at least {security_level} bits, but has {bits}")
            },
            Self::ExpansionFactorNotPowerOfTwo(value) => {
                write!(f, "expansion factor must be a power of 2, but was {value}")
            },
            Self::ExpansionFactorTooSmall(value, min) => {
                write!(f, "expansion factor cannot be smaller than {min}, but was {value}")
            },
            Self::TooFewColinearityChecks(value, security_level) => {
                write!(f, "number of colinearity checks must be at least half of the security level {security_level}, but was {value}")
            },
            Self::NoRegisters => {
                write!(f, "execution trace must have at least one register")
            },
            Self::EmptyTrace => {
                write!(f, "execution trace must have at least one cycle")
            },
            Self::ConstraintDegreeTooSmall => {
                write!(f, "transition constraints degree must be greater than 0")
            },
            Self::DomainTooLarge(err) => {
                write!(f, "evaluation domain cannot be built: {err}")
            },
        }
    }
}

impl std::error::Error for ConfigurationError {}

// CONSTRAINT ERROR
// ================================================================================================
/// Represents an error returned when transition or boundary constraints do not fit the
/// configuration they are used with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// This error occurs when no transition constraints are provided.
    NoTransitionConstraints,
    /// This error occurs when a transition constraint is defined over an unexpected number of
    /// variables; (constraint index, expected, actual).
    InvalidNumberOfVariables(usize, usize, usize),
    /// This error occurs when no boundary constraints are provided.
    NoBoundaryConstraints,
    /// This error occurs when a boundary constraint is placed against a register which does not
    /// exist; (register, number of registers).
    RegisterOutOfBounds(usize, usize),
    /// This error occurs when the last cycle referenced by boundary constraints does not match
    /// the trace length; (expected trace length, trace length implied by the boundary).
    TraceLengthMismatch(usize, usize),
    /// This error occurs when two boundary constraints are placed against the same register at
    /// the same cycle; (cycle, register).
    DuplicateBoundaryConstraint(usize, usize),
    /// This error occurs when the degree of the combination polynomial implied by transition
    /// constraints exceeds the degree FRI can attest to; (degree, maximum degree).
    ConstraintDegreeTooHigh(usize, usize),
    /// This error occurs when a boundary constraint is placed against a cycle which cannot be
    /// part of any execution trace.
    CycleOutOfBounds(usize),
}

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTransitionConstraints => {
                write!(f, "at least one transition constraint must be specified")
            },
            Self::InvalidNumberOfVariables(index, expected, actual) => {
                write!(f, "transition constraint {index} must be defined over {expected} variables, but was defined over {actual}")
            },
            Self::NoBoundaryConstraints => {
                write!(f, "at least one boundary constraint must be specified")
            },
            Self::RegisterOutOfBounds(register, num_registers) => {
                write!(f, "boundary constraint refers to register {register}, but the trace has only {num_registers} registers")
            },
            Self::TraceLengthMismatch(expected, actual) => {
                write!(f, "boundary constraints imply a trace of {actual} cycles, but the trace has {expected} cycles")
            },
            Self::DuplicateBoundaryConstraint(cycle, register) => {
                write!(f, "more than one boundary constraint is placed against register {register} at cycle {cycle}")
            },
            Self::ConstraintDegreeTooHigh(degree, max_degree) => {
                write!(f, "transition constraints imply a combination polynomial of degree {degree}, but the degree cannot exceed {max_degree}")
            },
            Self::CycleOutOfBounds(cycle) => {
                write!(f, "boundary constraint is placed against cycle {cycle} which is out of bounds")
            },
        }
    }
}

impl std::error::Error for ConstraintError {}
