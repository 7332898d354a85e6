// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

use crate::ConfigurationError;

// STARK OPTIONS
// ================================================================================================

/// STARK protocol parameters.
///
/// These parameters have a direct impact on proof soundness, proof generation time, and proof
/// size. Specifically:
///
/// 1. Expansion factor - the ratio between the size of the FRI evaluation domain and the size of
///    the domain over which the trace is interpolated. Higher values increase soundness of every
///    colinearity check, but also increase proof generation time.
/// 2. Number of colinearity checks - the number of queries in every FRI round. Higher values
///    increase proof soundness, but also increase proof size. Every check adds `4` randomizer
///    rows to the trace, which keeps the openings zero-knowledge.
/// 3. Security level - the targeted soundness in bits. It bounds the number of colinearity
///    checks from below and the size of the field from below.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct StarkOptions {
    expansion_factor: usize,
    num_colinearity_checks: usize,
    security_level: usize,
}

impl StarkOptions {
    // CONSTANTS
    // --------------------------------------------------------------------------------------------

    /// Smallest allowed expansion factor.
    pub const MIN_EXPANSION_FACTOR: usize = 4;

    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a new instance of [StarkOptions] struct constructed from the specified parameters.
    ///
    /// # Errors
    /// Returns an error if:
    /// * `expansion_factor` is not a power of two or is smaller than 4.
    /// * `num_colinearity_checks` is smaller than half of `security_level`.
    pub fn new(
        expansion_factor: usize,
        num_colinearity_checks: usize,
        security_level: usize,
    ) -> Result<StarkOptions, ConfigurationError> {
        if !expansion_factor.is_power_of_two() {
            return Err(ConfigurationError::ExpansionFactorNotPowerOfTwo(expansion_factor));
        }
        if expansion_factor < Self::MIN_EXPANSION_FACTOR {
            return Err(ConfigurationError::ExpansionFactorTooSmall(
                expansion_factor,
                Self::MIN_EXPANSION_FACTOR,
            ));
        }
        if 2 * num_colinearity_checks < security_level {
            return Err(ConfigurationError::TooFewColinearityChecks(
                num_colinearity_checks,
                security_level,
            ));
        }

        Ok(StarkOptions {
            expansion_factor,
            num_colinearity_checks,
            security_level,
        })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the ratio between the FRI domain and the trace interpolation domain.
    pub fn expansion_factor(&self) -> usize {
        self.expansion_factor
    }

    /// Returns the number of queries checked in every FRI round.
    pub fn num_colinearity_checks(&self) -> usize {
        self.num_colinearity_checks
    }

    /// Returns the targeted security level in bits.
    pub fn security_level(&self) -> usize {
        self.security_level
    }

    /// Returns the number of random rows appended to the execution trace.
    pub fn num_randomizers(&self) -> usize {
        4 * self.num_colinearity_checks
    }
}

impl Serializable for StarkOptions {
    /// Serializes `self` and writes the resulting bytes into the `target`.
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_usize(self.expansion_factor);
        target.write_usize(self.num_colinearity_checks);
        target.write_usize(self.security_level);
    }
}

impl Deserializable for StarkOptions {
    /// Reads STARK options from the specified `source` and returns the result.
    ///
    /// # Errors
    /// Returns an error if valid STARK options could not be read from the specified `source`.
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let expansion_factor = source.read_usize()?;
        let num_colinearity_checks = source.read_usize()?;
        let security_level = source.read_usize()?;
        StarkOptions::new(expansion_factor, num_colinearity_checks, security_level)
            .map_err(|err| DeserializationError::InvalidValue(err.to_string()))
    }
}
