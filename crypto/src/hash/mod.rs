// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::{fmt::Debug, slice};

use math::FieldElement;
use utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

mod blake;
pub use blake::Blake3_256;

mod sha;
pub use sha::Sha3_256;

// HASHER TRAITS
// ================================================================================================

/// Defines a cryptographic hash function.
///
/// This trait defines hash procedures for the following inputs:
/// * A sequence of bytes.
/// * Two digests - this is intended for use in Merkle tree constructions.
/// * A digest and a u64 value - this is intended for deriving Fiat-Shamir challenges from a
///   transcript digest.
/// * A sequence of field elements, hashed through their canonical byte encoding.
pub trait Hasher: 'static + Send + Sync {
    /// Specifies a digest type returned by this hasher.
    type Digest: Digest;

    /// Collision resistance of the hash function measured in bits.
    const COLLISION_RESISTANCE: u32;

    /// Returns a hash of the provided sequence of bytes.
    fn hash(bytes: &[u8]) -> Self::Digest;

    /// Returns a hash of two digests. This method is intended for use in construction of
    /// Merkle trees.
    fn merge(values: &[Self::Digest; 2]) -> Self::Digest;

    /// Returns hash(`seed` || `value`). This method is intended for use in PRNG and PoW contexts.
    fn merge_with_int(seed: Self::Digest, value: u64) -> Self::Digest;

    /// Returns a hash of the provided field elements.
    fn hash_elements<E: FieldElement>(elements: &[E]) -> Self::Digest {
        Self::hash(&elements.to_bytes())
    }
}

// DIGEST TRAIT
// ================================================================================================

/// Defines output type for a cryptographic hash function.
pub trait Digest:
    Debug + Default + Copy + Clone + Eq + PartialEq + Send + Sync + Serializable + Deserializable
{
    /// Returns this digest serialized into an array of bytes.
    ///
    /// Ideally, the length of the returned array should be defined by an associated constant, but
    /// using associated constants in const generics is not supported by Rust yet. Thus, we put an
    /// upper limit on the possible digest size. For digests which are smaller than 32 bytes, the
    /// unused bytes should be set to 0.
    fn as_bytes(&self) -> [u8; 32];
}

// BYTE DIGEST
// ================================================================================================

/// A digest consisting of `N` bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ByteDigest<const N: usize>([u8; N]);

impl<const N: usize> ByteDigest<N> {
    pub fn new(value: [u8; N]) -> Self {
        Self(value)
    }

    #[inline(always)]
    pub fn bytes_as_digests(bytes: &[[u8; N]]) -> &[ByteDigest<N>] {
        let p = bytes.as_ptr();
        let len = bytes.len();
        unsafe { slice::from_raw_parts(p as *const ByteDigest<N>, len) }
    }

    #[inline(always)]
    pub fn digests_as_bytes(digests: &[ByteDigest<N>]) -> &[u8] {
        let p = digests.as_ptr();
        let len = digests.len() * N;
        unsafe { slice::from_raw_parts(p as *const u8, len) }
    }
}

impl<const N: usize> Default for ByteDigest<N> {
    fn default() -> Self {
        ByteDigest([0; N])
    }
}

impl<const N: usize> Digest for ByteDigest<N> {
    fn as_bytes(&self) -> [u8; 32] {
        let mut result = [0; 32];
        result[..N].copy_from_slice(&self.0);
        result
    }
}

impl<const N: usize> AsRef<[u8]> for ByteDigest<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Serializable for ByteDigest<N> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_bytes(&self.0);
    }

    fn get_size_hint(&self) -> usize {
        N
    }
}

impl<const N: usize> Deserializable for ByteDigest<N> {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(ByteDigest(source.read_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteDigest, Digest};
    use utils::{Deserializable, Serializable, SliceReader};

    #[test]
    fn digest_serialization() {
        let d1 = ByteDigest([1_u8; 32]);
        let bytes = d1.to_bytes();
        assert_eq!(32, bytes.len());

        let mut reader = SliceReader::new(&bytes);
        let d2 = ByteDigest::<32>::read_from(&mut reader).unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn short_digest_is_zero_padded() {
        let d = ByteDigest([7_u8; 24]);
        let bytes = d.as_bytes();
        assert_eq!([7_u8; 24], bytes[..24]);
        assert_eq!([0_u8; 8], bytes[24..]);
    }

    #[test]
    fn digests_as_bytes() {
        let digests = [ByteDigest([1_u8; 32]), ByteDigest([2_u8; 32])];
        let bytes = ByteDigest::digests_as_bytes(&digests);
        assert_eq!(64, bytes.len());
        assert_eq!([1_u8; 32], bytes[..32]);
        assert_eq!([2_u8; 32], bytes[32..]);
    }
}
