// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use super::{Deserializable, DeserializationError};

// BYTE READER TRAIT
// ================================================================================================

/// Defines how primitive values are to be read from `Self`.
///
/// Every `read_*` function advances the reader past the bytes it consumed. A failed read may
/// leave the reader partially advanced.
pub trait ByteReader {
    // REQUIRED METHODS
    // --------------------------------------------------------------------------------------------

    /// Returns a single byte read from `self`.
    ///
    /// # Errors
    /// Returns [DeserializationError::UnexpectedEOF] if the reader is at EOF.
    fn read_u8(&mut self) -> Result<u8, DeserializationError>;

    /// Returns a slice of `len` bytes read from `self`.
    ///
    /// # Errors
    /// Returns [DeserializationError::UnexpectedEOF] if fewer than `len` bytes are left.
    fn read_slice(&mut self, len: usize) -> Result<&[u8], DeserializationError>;

    /// Returns true if there are more bytes left to be read from `self`.
    fn has_more_bytes(&self) -> bool;

    // PROVIDED METHODS
    // --------------------------------------------------------------------------------------------

    /// Returns a byte array of length `N` read from `self`.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DeserializationError> {
        let mut result = [0u8; N];
        result.copy_from_slice(self.read_slice(N)?);
        Ok(result)
    }

    /// Returns a u128 value read from `self` in little-endian byte order.
    fn read_u128(&mut self) -> Result<u128, DeserializationError> {
        Ok(u128::from_le_bytes(self.read_array()?))
    }

    /// Returns a usize value read from `self` in [vint64](https://docs.rs/vint64/latest/vint64/)
    /// format.
    ///
    /// The number of trailing zeros in the first byte determines the length of the encoding; a
    /// zero first byte is followed by the raw 8-byte value.
    ///
    /// # Errors
    /// Returns an error if the value could not be read, or if it does not fit into `usize` on
    /// the current platform.
    fn read_usize(&mut self) -> Result<usize, DeserializationError> {
        let first_byte = self.read_u8()?;
        let length = first_byte.trailing_zeros() as usize + 1;

        let value = if length == 9 {
            u64::from_le_bytes(self.read_array()?)
        } else {
            let mut encoded = [first_byte, 0, 0, 0, 0, 0, 0, 0];
            encoded[1..length].copy_from_slice(self.read_slice(length - 1)?);
            u64::from_le_bytes(encoded) >> length
        };

        usize::try_from(value).map_err(|_| {
            DeserializationError::InvalidValue(format!("value {value} does not fit into usize"))
        })
    }

    /// Reads a deserializable value from `self`.
    fn read<D>(&mut self) -> Result<D, DeserializationError>
    where
        Self: Sized,
        D: Deserializable,
    {
        D::read_from(self)
    }

    /// Reads `num_elements` deserializable values from `self`.
    fn read_many<D>(&mut self, num_elements: usize) -> Result<Vec<D>, DeserializationError>
    where
        Self: Sized,
        D: Deserializable,
    {
        D::read_batch_from(self, num_elements)
    }
}

// SLICE READER
// ================================================================================================

/// Implements [ByteReader] trait for a slice of bytes.
pub struct SliceReader<'a> {
    source: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Creates a new slice reader from the specified slice.
    pub fn new(source: &'a [u8]) -> Self {
        SliceReader { source, pos: 0 }
    }

    /// Returns the number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl ByteReader for SliceReader<'_> {
    fn read_u8(&mut self) -> Result<u8, DeserializationError> {
        let byte = *self.source.get(self.pos).ok_or(DeserializationError::UnexpectedEOF)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_slice(&mut self, len: usize) -> Result<&[u8], DeserializationError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.source.len())
            .ok_or(DeserializationError::UnexpectedEOF)?;
        let result = &self.source[self.pos..end];
        self.pos = end;
        Ok(result)
    }

    fn has_more_bytes(&self) -> bool {
        self.pos < self.source.len()
    }
}
