// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use crypto::{Digest, Hasher};
use fri::FriOptions;
use math::{
    get_power_series, get_power_series_with_offset, MathError, MultivariatePolynomial, Polynomial,
    StarkField,
};

use crate::{
    boundary::{implied_trace_length, register_points},
    transition::num_transition_variables,
    BoundaryConstraint, ConfigurationError, ConstraintError, StarkOptions,
};

#[cfg(test)]
mod tests;

// STARK CONTEXT
// ================================================================================================
/// STARK parameters and trace properties for a specific computation.
///
/// The context is derived from [StarkOptions] and the shape of the execution trace, and is
/// identical for the prover and the verifier. It defines two evaluation domains:
/// * The trace domain, generated by `omicron`, over which the randomized execution trace is
///   interpolated. Its size is the smallest power of two which can accommodate the symbolic
///   evaluation of transition constraints.
/// * The FRI domain, the coset of the subgroup generated by `omega` shifted by the field
///   generator, which is `expansion_factor` times larger than the trace domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarkContext<E: StarkField> {
    options: StarkOptions,
    num_registers: usize,
    original_trace_length: usize,
    transition_constraints_degree: usize,
    omicron_domain_length: usize,
    fri_domain_length: usize,
    generator: E,
    omega: E,
    omicron: E,
}

impl<E: StarkField> StarkContext<E> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------
    /// Returns a new context for a trace with `num_registers` registers and
    /// `original_trace_length` cycles, constrained by transition constraints of degree at most
    /// `transition_constraints_degree`.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The field modulus has fewer bits than the security level of `options`.
    /// * `num_registers` or `original_trace_length` is zero.
    /// * `transition_constraints_degree` is zero.
    /// * The field does not contain roots of unity of the orders needed for the domains.
    pub fn new(
        options: StarkOptions,
        num_registers: usize,
        original_trace_length: usize,
        transition_constraints_degree: usize,
    ) -> Result<Self, ConfigurationError> {
        if (E::MODULUS_BITS as usize) < options.security_level() {
            return Err(ConfigurationError::FieldTooSmall(
                E::MODULUS_BITS,
                options.security_level(),
            ));
        }
        if num_registers == 0 {
            return Err(ConfigurationError::NoRegisters);
        }
        if original_trace_length == 0 {
            return Err(ConfigurationError::EmptyTrace);
        }
        if transition_constraints_degree == 0 {
            return Err(ConfigurationError::ConstraintDegreeTooSmall);
        }

        let randomized_trace_length = original_trace_length + options.num_randomizers();
        let omicron_domain_length =
            (randomized_trace_length * transition_constraints_degree).next_power_of_two();
        let fri_domain_length = omicron_domain_length * options.expansion_factor();

        let omega = E::primitive_nth_root(fri_domain_length as u128)
            .map_err(ConfigurationError::DomainTooLarge)?;
        let omicron = E::primitive_nth_root(omicron_domain_length as u128)
            .map_err(ConfigurationError::DomainTooLarge)?;

        Ok(StarkContext {
            options,
            num_registers,
            original_trace_length,
            transition_constraints_degree,
            omicron_domain_length,
            fri_domain_length,
            generator: E::GENERATOR,
            omega,
            omicron,
        })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the options this context was built from.
    pub fn options(&self) -> &StarkOptions {
        &self.options
    }

    /// Returns the number of registers (columns) of the execution trace.
    pub fn num_registers(&self) -> usize {
        self.num_registers
    }

    /// Returns the number of cycles (rows) of the execution trace before randomization.
    pub fn original_trace_length(&self) -> usize {
        self.original_trace_length
    }

    pub fn transition_constraints_degree(&self) -> usize {
        self.transition_constraints_degree
    }

    /// Returns the number of random rows appended to the execution trace.
    pub fn num_randomizers(&self) -> usize {
        self.options.num_randomizers()
    }

    /// Returns the number of rows of the execution trace after randomization.
    pub fn randomized_trace_length(&self) -> usize {
        self.original_trace_length + self.num_randomizers()
    }

    pub fn expansion_factor(&self) -> usize {
        self.options.expansion_factor()
    }

    /// Returns the size of the trace domain.
    pub fn omicron_domain_length(&self) -> usize {
        self.omicron_domain_length
    }

    /// Returns the size of the FRI domain.
    pub fn fri_domain_length(&self) -> usize {
        self.fri_domain_length
    }

    /// Returns the offset of the FRI domain.
    pub fn generator(&self) -> E {
        self.generator
    }

    /// Returns the generator of the subgroup underlying the FRI domain.
    pub fn omega(&self) -> E {
        self.omega
    }

    /// Returns the generator of the trace domain.
    pub fn omicron(&self) -> E {
        self.omicron
    }

    // DOMAINS
    // --------------------------------------------------------------------------------------------

    /// Returns the first `length` points of the trace domain: `omicron^i`.
    pub fn trace_domain(&self, length: usize) -> Vec<E> {
        get_power_series(self.omicron, length)
    }

    /// Returns all points of the FRI domain: `generator * omega^i`.
    pub fn fri_domain(&self) -> Vec<E> {
        get_power_series_with_offset(self.omega, self.generator, self.fri_domain_length)
    }

    /// Returns the point of the FRI domain at the specified index.
    pub fn fri_domain_point(&self, index: usize) -> E {
        self.generator * self.omega.exp((index as u64).into())
    }

    /// Returns options of the FRI protocol used to prove that the combination polynomial is of
    /// low degree.
    pub fn fri_options(&self) -> FriOptions<E> {
        FriOptions::new(
            self.generator,
            self.omega,
            self.fri_domain_length,
            self.options.expansion_factor(),
            self.options.num_colinearity_checks(),
        )
    }

    // CONSTRAINT VALIDATION
    // --------------------------------------------------------------------------------------------

    /// Checks that transition constraints are defined over `1 + 2 * num_registers` variables,
    /// and that the combination polynomial they imply fits into the trace domain.
    ///
    /// # Errors
    /// Returns an error if:
    /// * No constraints are provided.
    /// * Any constraint is defined over an unexpected number of variables.
    /// * The degree of the combination polynomial is not smaller than the size of the trace
    ///   domain. This happens when constraints are of higher degree than the one the context was
    ///   built for.
    pub fn validate_transition_constraints(
        &self,
        constraints: &[MultivariatePolynomial<E>],
    ) -> Result<(), ConstraintError> {
        if constraints.is_empty() {
            return Err(ConstraintError::NoTransitionConstraints);
        }
        let expected = num_transition_variables(self.num_registers);
        for (i, constraint) in constraints.iter().enumerate() {
            if constraint.num_variables() != expected {
                return Err(ConstraintError::InvalidNumberOfVariables(
                    i,
                    expected,
                    constraint.num_variables(),
                ));
            }
        }

        let max_degree = self.max_degree(constraints);
        if max_degree >= self.omicron_domain_length {
            return Err(ConstraintError::ConstraintDegreeTooHigh(
                max_degree,
                self.omicron_domain_length - 1,
            ));
        }
        Ok(())
    }

    /// Checks that boundary constraints refer to existing registers, that no register is
    /// constrained twice at the same cycle, and that the last constrained cycle is the last cycle
    /// of the original trace.
    ///
    /// # Errors
    /// Returns an error if any of the above conditions does not hold.
    pub fn validate_boundary(&self, boundary: &[BoundaryConstraint<E>]) -> Result<(), ConstraintError> {
        let trace_length = implied_trace_length(boundary)?;

        let mut seen = BTreeSet::new();
        for constraint in boundary {
            if constraint.register() >= self.num_registers {
                return Err(ConstraintError::RegisterOutOfBounds(
                    constraint.register(),
                    self.num_registers,
                ));
            }
            if !seen.insert((constraint.cycle(), constraint.register())) {
                return Err(ConstraintError::DuplicateBoundaryConstraint(
                    constraint.cycle(),
                    constraint.register(),
                ));
            }
        }

        if trace_length != self.original_trace_length {
            return Err(ConstraintError::TraceLengthMismatch(
                self.original_trace_length,
                trace_length,
            ));
        }
        Ok(())
    }

    // DEGREE BOOKKEEPING
    // --------------------------------------------------------------------------------------------

    /// Returns upper bounds on the degrees of transition polynomials, i.e. of transition
    /// constraints evaluated symbolically at `[x] + trace_polynomials + shifted_trace_polynomials`.
    pub fn transition_degree_bounds(&self, constraints: &[MultivariatePolynomial<E>]) -> Vec<usize> {
        let mut point_degrees = vec![self.randomized_trace_length() - 1; 1 + 2 * self.num_registers];
        point_degrees[0] = 1;
        constraints.iter().map(|constraint| constraint.degree_bound(&point_degrees)).collect()
    }

    /// Returns upper bounds on the degrees of transition quotients, i.e. of transition
    /// polynomials divided by the transition zerofier.
    pub fn transition_quotient_degree_bounds(
        &self,
        constraints: &[MultivariatePolynomial<E>],
    ) -> Vec<usize> {
        self.transition_degree_bounds(constraints)
            .into_iter()
            .map(|degree| degree.saturating_sub(self.original_trace_length - 1))
            .collect()
    }

    /// Returns the degree of the combination polynomial: the largest transition quotient degree
    /// bound rounded up to one less than a power of two.
    pub fn max_degree(&self, constraints: &[MultivariatePolynomial<E>]) -> usize {
        let max_bound =
            self.transition_quotient_degree_bounds(constraints).into_iter().max().unwrap_or(0);
        let bit_length = (usize::BITS - max_bound.leading_zeros()).max(1);
        (1 << bit_length) - 1
    }

    /// Returns the polynomial which vanishes on the first `original_trace_length - 1` points of
    /// the trace domain, i.e. on every row which has a successor in the original trace.
    pub fn transition_zerofier(&self) -> Polynomial<E> {
        Polynomial::zerofier_domain(&self.trace_domain(self.original_trace_length - 1))
    }

    /// Returns, for every register, the polynomial which vanishes on the points of the trace
    /// domain at which the register is constrained.
    pub fn boundary_zerofiers(&self, boundary: &[BoundaryConstraint<E>]) -> Vec<Polynomial<E>> {
        (0..self.num_registers)
            .map(|register| {
                let points: Vec<E> = register_points(boundary, register)
                    .into_iter()
                    .map(|(cycle, _)| self.omicron.exp((cycle as u64).into()))
                    .collect();
                Polynomial::zerofier_domain(&points)
            })
            .collect()
    }

    /// Returns, for every register, the polynomial of the smallest degree which takes the
    /// constrained values at the points of the trace domain at which the register is
    /// constrained.
    ///
    /// # Errors
    /// Returns an error if a register is constrained more than once at the same cycle.
    pub fn boundary_interpolants(
        &self,
        boundary: &[BoundaryConstraint<E>],
    ) -> Result<Vec<Polynomial<E>>, MathError> {
        (0..self.num_registers)
            .map(|register| {
                let (domain, values): (Vec<E>, Vec<E>) = register_points(boundary, register)
                    .into_iter()
                    .map(|(cycle, value)| (self.omicron.exp((cycle as u64).into()), value))
                    .unzip();
                Polynomial::interpolate_domain(&domain, &values)
            })
            .collect()
    }

    /// Returns upper bounds on the degrees of boundary quotients for a trace of the specified
    /// length.
    pub fn boundary_quotient_degree_bounds(
        &self,
        randomized_trace_length: usize,
        boundary: &[BoundaryConstraint<E>],
    ) -> Vec<usize> {
        let randomized_trace_degree = randomized_trace_length - 1;
        (0..self.num_registers)
            .map(|register| {
                let zerofier_degree = register_points(boundary, register).len();
                randomized_trace_degree.saturating_sub(zerofier_degree)
            })
            .collect()
    }

    // FIAT-SHAMIR
    // --------------------------------------------------------------------------------------------

    /// Returns the number of weights of the combination polynomial: one for the randomizer, and
    /// two for every transition and boundary quotient.
    pub fn num_weights(&self, num_transition_constraints: usize) -> usize {
        1 + 2 * num_transition_constraints + 2 * self.num_registers
    }
}

/// Derives `number` pseudo-random field elements from `seed`; the i-th element is sampled from
/// `H(seed || i)`.
pub fn sample_weights<E: StarkField, H: Hasher>(number: usize, seed: H::Digest) -> Vec<E> {
    (0..number as u64)
        .map(|i| E::sample(&H::merge_with_int(seed, i).as_bytes()))
        .collect()
}
