// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use super::DeserializationError;

mod byte_reader;
pub use byte_reader::{ByteReader, SliceReader};

mod byte_writer;
pub use byte_writer::ByteWriter;

// SERIALIZABLE TRAIT
// ================================================================================================

/// Defines how to serialize `Self` into bytes.
pub trait Serializable {
    /// Serializes `self` into bytes and writes these bytes into the `target`.
    fn write_into<W: ByteWriter>(&self, target: &mut W);

    /// Serializes `self` into a vector of bytes.
    fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.get_size_hint());
        self.write_into(&mut result);
        result
    }

    /// Returns an estimate of how many bytes are needed to represent self; zero by default.
    fn get_size_hint(&self) -> usize {
        0
    }
}

impl<T: Serializable + ?Sized> Serializable for &T {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        T::write_into(*self, target)
    }

    fn get_size_hint(&self) -> usize {
        T::get_size_hint(*self)
    }
}

impl Serializable for u8 {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u8(*self);
    }

    fn get_size_hint(&self) -> usize {
        1
    }
}

impl Serializable for u128 {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u128(*self);
    }

    fn get_size_hint(&self) -> usize {
        16
    }
}

impl Serializable for usize {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_usize(*self);
    }

    fn get_size_hint(&self) -> usize {
        byte_writer::usize_encoded_len(*self as u64)
    }
}

impl<const N: usize> Serializable for [u8; N] {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_bytes(self);
    }

    fn get_size_hint(&self) -> usize {
        N
    }
}

impl<T: Serializable> Serializable for [T] {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_many(self);
    }

    fn get_size_hint(&self) -> usize {
        self.iter().map(|item| item.get_size_hint()).sum()
    }
}

impl<T: Serializable> Serializable for Vec<T> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.as_slice().write_into(target);
    }

    fn get_size_hint(&self) -> usize {
        self.as_slice().get_size_hint()
    }
}

// DESERIALIZABLE TRAIT
// ================================================================================================

/// Defines how to deserialize `Self` from bytes.
pub trait Deserializable: Sized {
    /// Reads a sequence of bytes from the provided `source`, attempts to deserialize these bytes
    /// into `Self`, and returns the result.
    ///
    /// # Errors
    /// Returns an error if the `source` does not contain enough bytes, or if the bytes read do
    /// not represent a valid value of `Self`.
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError>;

    /// Attempts to deserialize the provided `bytes` into `Self`; all bytes must be consumed.
    fn read_from_bytes(bytes: &[u8]) -> Result<Self, DeserializationError> {
        let mut source = SliceReader::new(bytes);
        let result = Self::read_from(&mut source)?;
        if source.has_more_bytes() {
            return Err(DeserializationError::UnconsumedBytes);
        }
        Ok(result)
    }

    /// Reads `num_elements` values of `Self` from the provided `source`.
    fn read_batch_from<R: ByteReader>(
        source: &mut R,
        num_elements: usize,
    ) -> Result<Vec<Self>, DeserializationError> {
        // a corrupted length prefix must not trigger a huge allocation
        let mut result = Vec::with_capacity(num_elements.min(1024));
        for _ in 0..num_elements {
            result.push(Self::read_from(source)?);
        }
        Ok(result)
    }
}

impl Deserializable for u8 {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        source.read_u8()
    }
}

impl Deserializable for u128 {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        source.read_u128()
    }
}

impl Deserializable for usize {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        source.read_usize()
    }
}

impl<const N: usize> Deserializable for [u8; N] {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        source.read_array()
    }
}
