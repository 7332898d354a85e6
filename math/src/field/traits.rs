// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::{
    fmt::{Debug, Display},
    ops::{
        Add, AddAssign, BitAnd, Div, DivAssign, Mul, MulAssign, Neg, Shl, Shr, ShrAssign, Sub,
        SubAssign,
    },
};

use utils::{Deserializable, Randomizable, Serializable};

use crate::errors::MathError;

// FIELD ELEMENT
// ================================================================================================

/// Defines an element in a finite field.
///
/// This trait defines basic arithmetic operations for elements in
/// [finite fields](https://en.wikipedia.org/wiki/Finite_field) (e.g. addition subtraction,
/// multiplication, division) as well as several convenience functions (e.g. double, square cube).
/// Moreover, it defines interfaces for serializing and deserializing field elements.
///
/// Elements are always kept in canonical form, so equality of two elements is equality of the
/// residues they represent.
pub trait FieldElement:
    Copy
    + Clone
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + PartialEq
    + Sized
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Div<Self, Output = Self>
    + AddAssign<Self>
    + SubAssign<Self>
    + MulAssign<Self>
    + DivAssign<Self>
    + Neg<Output = Self>
    + From<u64>
    + From<u32>
    + From<u16>
    + From<u8>
    + for<'a> TryFrom<&'a [u8]>
    + Randomizable
    + Serializable
    + Deserializable
{
    /// A type defining positive integers big enough to describe the field modulus with no loss
    /// of precision.
    type PositiveInteger: Debug
        + Copy
        + PartialEq
        + PartialOrd
        + ShrAssign
        + Shl<u32, Output = Self::PositiveInteger>
        + Shr<u32, Output = Self::PositiveInteger>
        + BitAnd<Output = Self::PositiveInteger>
        + From<u32>
        + From<u64>;

    /// Number of bytes needed to encode an element
    const ELEMENT_BYTES: usize;

    /// The additive identity.
    const ZERO: Self;

    /// The multiplicative identity.
    const ONE: Self;

    // ALGEBRA
    // --------------------------------------------------------------------------------------------

    /// Returns this field element added to itself.
    #[must_use]
    fn double(self) -> Self {
        self + self
    }

    /// Returns this field element raised to power 2.
    #[must_use]
    fn square(self) -> Self {
        self * self
    }

    /// Returns this field element raised to power 3.
    #[must_use]
    fn cube(self) -> Self {
        self * self * self
    }

    /// Exponentiates this field element by `power` parameter.
    #[must_use]
    fn exp(self, power: Self::PositiveInteger) -> Self {
        let mut r = Self::ONE;
        let mut b = self;
        let mut p = power;

        let int_zero = Self::PositiveInteger::from(0u32);
        let int_one = Self::PositiveInteger::from(1u32);

        if p == int_zero {
            return Self::ONE;
        } else if b == Self::ZERO {
            return Self::ZERO;
        }

        while p > int_zero {
            if p & int_one == int_one {
                r *= b;
            }
            p >>= int_one;
            b = b.square();
        }

        r
    }

    /// Exponentiates this field element by a signed `power`; negative powers exponentiate the
    /// multiplicative inverse of this element.
    ///
    /// # Errors
    /// Returns [MathError::DivisionByZero] if this element is ZERO and `power` is negative.
    fn exp_signed(self, power: i64) -> Result<Self, MathError> {
        let magnitude = Self::PositiveInteger::from(power.unsigned_abs());
        if power >= 0 {
            Ok(self.exp(magnitude))
        } else {
            Ok(self.try_inv()?.exp(magnitude))
        }
    }

    /// Returns a multiplicative inverse of this field element. If this element is ZERO, ZERO is
    /// returned.
    #[must_use]
    fn inv(self) -> Self;

    /// Returns a multiplicative inverse of this field element.
    ///
    /// # Errors
    /// Returns [MathError::DivisionByZero] if this element is ZERO.
    fn try_inv(self) -> Result<Self, MathError> {
        if self == Self::ZERO {
            Err(MathError::DivisionByZero)
        } else {
            Ok(self.inv())
        }
    }

    /// Returns this element divided by `rhs`.
    ///
    /// # Errors
    /// Returns [MathError::DivisionByZero] if `rhs` is ZERO.
    fn try_div(self, rhs: Self) -> Result<Self, MathError> {
        Ok(self * rhs.try_inv()?)
    }

    // INITIALIZATION
    // --------------------------------------------------------------------------------------------

    /// Returns a vector initialized with all zero elements; specialized implementations of this
    /// function may be faster than the generic implementation.
    fn zeroed_vector(n: usize) -> Vec<Self> {
        vec![Self::ZERO; n]
    }
}

// STARK FIELD
// ================================================================================================

/// Defines an element in a STARK-friendly finite field.
///
/// A STARK-friendly field is defined as a prime field with high two-adicity. That is, the
/// modulus of the field should be a prime number of the form `k` * 2^`n` + 1 (a Proth prime),
/// where `n` is relatively large (e.g., greater than 32).
///
/// The associated constants of this trait act as the immutable field descriptor shared by every
/// component of the protocol.
pub trait StarkField: FieldElement {
    /// Prime modulus of the field. Must be of the form `k` * 2^`n` + 1 (a Proth prime).
    /// This ensures that the field has high 2-adicity.
    const MODULUS: Self::PositiveInteger;

    /// The number of bits needed to represents `Self::MODULUS`.
    const MODULUS_BITS: u32;

    /// A multiplicative generator of the field.
    const GENERATOR: Self;

    /// Let Self::MODULUS = `k` * 2^`n` + 1; then, TWO_ADICITY is `n`.
    const TWO_ADICITY: u32;

    /// Let Self::MODULUS = `k` * 2^`n` + 1; then, TWO_ADIC_ROOT_OF_UNITY is 2^`n` root of unity
    /// computed as Self::GENERATOR^`k`.
    const TWO_ADIC_ROOT_OF_UNITY: Self;

    /// Returns the root of unity of order 2^`n`.
    ///
    /// # Panics
    /// Panics if the root of unity for the specified order does not exist in this field.
    fn get_root_of_unity(n: u32) -> Self {
        assert!(n != 0, "cannot get root of unity for n = 0");
        assert!(n <= Self::TWO_ADICITY, "order cannot exceed 2^{}", Self::TWO_ADICITY);
        let power = Self::PositiveInteger::from(1u32) << (Self::TWO_ADICITY - n);
        Self::TWO_ADIC_ROOT_OF_UNITY.exp(power)
    }

    /// Returns a primitive root of unity of order `n`, i.e. an element `w` such that `w^n = 1`
    /// and `w^k != 1` for all `0 < k < n`.
    ///
    /// # Errors
    /// Returns [MathError::InvalidRootOrder] if `n` is zero or does not divide `MODULUS - 1`.
    fn primitive_nth_root(n: u128) -> Result<Self, MathError>;

    /// Returns a field element derived from an arbitrary sequence of bytes.
    ///
    /// Bytes are interpreted as a big-endian integer which is then reduced modulo the field
    /// modulus; the distribution of the result is close to uniform when `bytes` is a uniformly
    /// random string substantially longer than the modulus.
    fn sample(bytes: &[u8]) -> Self;

    /// Returns a canonical integer representation of the field element.
    fn as_int(&self) -> Self::PositiveInteger;
}
