// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! An implementation of a 128-bit STARK-friendly prime field with modulus $407 \cdot 2^{119} + 1$.
//!
//! Elements are stored in their canonical form using `u128` as the backing type. Multiplication
//! is implemented via Montgomery reduction over two 64-bit limbs, after which the product is
//! converted back into canonical form. The field has two-adicity 119, so power-of-two domains of
//! any practical size are available.

use core::{
    fmt::{Debug, Display, Formatter},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use utils::{
    ByteReader, ByteWriter, Deserializable, DeserializationError, Randomizable, Serializable,
};

use super::{FieldElement, StarkField};
use crate::errors::MathError;


// CONSTANTS
// ================================================================================================

// Field modulus = 407 * 2^119 + 1
const M: u128 = 270497897142230380135924736767050121217;

// Low and high 64-bit limbs of the modulus
const M0: u64 = M as u64;
const M1: u64 = (M >> 64) as u64;

// 2^256 mod M; used to move a Montgomery product back into canonical form
const R2: u128 = 0xaaf4ad9a1a6aedc25bd53a7f0e778236;

// 2^119 root of unity = 3^407
const G: u128 = 85408008396924667383611388730472331217;

// Number of bytes needed to represent field element
const ELEMENT_BYTES: usize = core::mem::size_of::<u128>();

// FIELD ELEMENT
// ================================================================================================

/// Represents a base field element.
///
/// Internal values are stored in their canonical form in the range [0, M). The backing type is
/// `u128`.
#[derive(Copy, Clone, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BaseElement(u128);

impl BaseElement {
    /// Creates a new field element from a u128 value. If the value is greater than or equal to
    /// the field modulus, modular reduction is silently performed. This function can also be used
    /// to initialize constants.
    pub const fn new(value: u128) -> Self {
        // 2 * M > 2^128, so a single subtraction always suffices
        BaseElement(if value < M { value } else { value - M })
    }
}

impl FieldElement for BaseElement {
    type PositiveInteger = u128;

    const ZERO: Self = BaseElement(0);
    const ONE: Self = BaseElement(1);

    const ELEMENT_BYTES: usize = ELEMENT_BYTES;

    fn inv(self) -> Self {
        BaseElement(inv(self.0))
    }
}

impl StarkField for BaseElement {
    /// sage: MODULUS = 407 * 2^119 + 1 \
    /// sage: GF(MODULUS).is_prime_field() \
    /// True \
    /// sage: GF(MODULUS).order() \
    /// 270497897142230380135924736767050121217
    const MODULUS: Self::PositiveInteger = M;
    const MODULUS_BITS: u32 = 128;

    /// sage: GF(MODULUS).primitive_element() \
    /// 3
    const GENERATOR: Self = BaseElement(3);

    /// sage: is_odd((MODULUS - 1) / 2^119) \
    /// True
    const TWO_ADICITY: u32 = 119;

    /// sage: k = (MODULUS - 1) / 2^119 \
    /// sage: GF(MODULUS).primitive_element()^k \
    /// 85408008396924667383611388730472331217
    const TWO_ADIC_ROOT_OF_UNITY: Self = BaseElement(G);

    fn primitive_nth_root(n: u128) -> Result<Self, MathError> {
        if n == 0 || (M - 1) % n != 0 {
            return Err(MathError::InvalidRootOrder(n));
        }
        Ok(Self::GENERATOR.exp((M - 1) / n))
    }

    fn sample(bytes: &[u8]) -> Self {
        let radix = BaseElement(256);
        bytes
            .iter()
            .fold(Self::ZERO, |acc, &byte| acc * radix + BaseElement(byte as u128))
    }

    #[inline]
    fn as_int(&self) -> Self::PositiveInteger {
        self.0
    }
}

impl Randomizable for BaseElement {
    const VALUE_SIZE: usize = Self::ELEMENT_BYTES;

    fn from_random_bytes(bytes: &[u8]) -> Option<Self> {
        Self::try_from(bytes).ok()
    }
}

impl Debug for BaseElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self}")
    }
}

impl Display for BaseElement {
    fn fmt(&self, f: &mut Formatter) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// OVERLOADED OPERATORS
// ================================================================================================

impl Add for BaseElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(add(self.0, rhs.0))
    }
}

impl AddAssign for BaseElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl Sub for BaseElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(sub(self.0, rhs.0))
    }
}

impl SubAssign for BaseElement {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for BaseElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(mul(self.0, rhs.0))
    }
}

impl MulAssign for BaseElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs
    }
}

impl Div for BaseElement {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Self) -> Self {
        Self(mul(self.0, inv(rhs.0)))
    }
}

impl DivAssign for BaseElement {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs
    }
}

impl Neg for BaseElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self(sub(0, self.0))
    }
}

// TYPE CONVERSIONS
// ================================================================================================

impl From<u128> for BaseElement {
    /// Converts a 128-bit value into a field element. If the value is greater than or equal to
    /// the field modulus, modular reduction is silently performed.
    fn from(value: u128) -> Self {
        Self::new(value)
    }
}

impl From<u64> for BaseElement {
    /// Converts a 64-bit value into a field element.
    fn from(value: u64) -> Self {
        BaseElement(value as u128)
    }
}

impl From<u32> for BaseElement {
    /// Converts a 32-bit value into a field element.
    fn from(value: u32) -> Self {
        BaseElement(value as u128)
    }
}

impl From<u16> for BaseElement {
    /// Converts a 16-bit value into a field element.
    fn from(value: u16) -> Self {
        BaseElement(value as u128)
    }
}

impl From<u8> for BaseElement {
    /// Converts an 8-bit value into a field element.
    fn from(value: u8) -> Self {
        BaseElement(value as u128)
    }
}

impl TryFrom<&'_ [u8]> for BaseElement {
    type Error = DeserializationError;

    /// Converts a slice of bytes into a field element; returns error if the value encoded in bytes
    /// is not a valid field element. The bytes are assumed to be in little-endian byte order.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; ELEMENT_BYTES] = bytes.try_into().map_err(|_| {
            DeserializationError::InvalidValue(format!(
                "expected {ELEMENT_BYTES} bytes for a field element, but received {}",
                bytes.len()
            ))
        })?;
        let value = u128::from_le_bytes(bytes);
        if value >= M {
            return Err(DeserializationError::InvalidValue(format!(
                "invalid field element: value {value} is greater than or equal to the field modulus"
            )));
        }
        Ok(BaseElement(value))
    }
}

// SERIALIZATION / DESERIALIZATION
// ------------------------------------------------------------------------------------------------

impl Serializable for BaseElement {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u128(self.0);
    }

    fn get_size_hint(&self) -> usize {
        ELEMENT_BYTES
    }
}

impl Deserializable for BaseElement {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let value = source.read_u128()?;
        if value >= M {
            return Err(DeserializationError::InvalidValue(format!(
                "invalid field element: value {value} is greater than or equal to the field modulus"
            )));
        }
        Ok(BaseElement(value))
    }
}

// FINITE FIELD ARITHMETIC
// ================================================================================================

/// Computes (a + b) % m; a and b are assumed to be valid field elements.
#[inline]
fn add(a: u128, b: u128) -> u128 {
    // the modulus is larger than 2^127, so the sum may overflow 128 bits
    let (sum, overflow) = a.overflowing_add(b);
    if overflow || sum >= M {
        sum.wrapping_sub(M)
    } else {
        sum
    }
}

/// Computes (a - b) % m; a and b are assumed to be valid field elements.
#[inline]
fn sub(a: u128, b: u128) -> u128 {
    let (diff, underflow) = a.overflowing_sub(b);
    if underflow {
        diff.wrapping_add(M)
    } else {
        diff
    }
}

/// Computes (a * b) % m; a and b are assumed to be valid field elements.
#[inline]
fn mul(a: u128, b: u128) -> u128 {
    // mont_mul(a, b) = a * b / 2^128; multiplying by 2^256 in Montgomery form undoes the division
    mont_mul(mont_mul(a, b), R2)
}

/// Computes y such that (x * y) % m = 1 except for when when x = 0; in such a case,
/// 0 is returned; x is assumed to be a valid field element.
fn inv(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }

    // Fermat's little theorem: x^(m - 2) = x^-1
    let mut result = 1;
    let mut base = x;
    let mut power = M - 2;
    while power > 0 {
        if power & 1 == 1 {
            result = mul(result, base);
        }
        base = mul(base, base);
        power >>= 1;
    }
    result
}

// HELPER FUNCTIONS
// ================================================================================================

/// Computes a * b * 2^-128 mod m using the CIOS variant of Montgomery multiplication.
///
/// Since the lowest limb of the modulus is 1, -m^-1 mod 2^64 is 2^64 - 1, and the reduction
/// factor for each round is simply the negation of the lowest limb of the accumulator.
#[inline]
fn mont_mul(a: u128, b: u128) -> u128 {
    let a = [a as u64, (a >> 64) as u64];
    let b = [b as u64, (b >> 64) as u64];
    let mut t = [0u64; 4];

    for &bi in b.iter() {
        // t = t + a * b_i
        let (t0, carry) = mac(t[0], a[0], bi, 0);
        let (t1, carry) = mac(t[1], a[1], bi, carry);
        let (t2, t3) = adc(t[2], carry);
        t[0] = t0;
        t[1] = t1;
        t[2] = t2;
        t[3] = t3;

        // t = (t + k * m) / 2^64, where k is chosen to zero out the lowest limb
        let k = t[0].wrapping_neg();
        let (_, carry) = mac(t[0], k, M0, 0);
        let (t0, carry) = mac(t[1], k, M1, carry);
        let (t1, carry) = adc(t[2], carry);
        t[0] = t0;
        t[1] = t1;
        t[2] = t[3] + carry;
    }

    // the result is smaller than 2m, so at most one subtraction is needed
    let result = (t[0] as u128) | ((t[1] as u128) << 64);
    if t[2] != 0 || result >= M {
        result.wrapping_sub(M)
    } else {
        result
    }
}

/// Computes a + b * c + carry, returning the low 64 bits and the carry.
#[inline(always)]
const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Computes a + b, returning the low 64 bits and the carry.
#[inline(always)]
const fn adc(a: u64, b: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128);
    (ret as u64, (ret >> 64) as u64)
}
