// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use super::Serializable;

// BYTE WRITER TRAIT
// ================================================================================================

/// Defines how primitive values are to be written into `Self`.
pub trait ByteWriter: Sized {
    // REQUIRED METHODS
    // --------------------------------------------------------------------------------------------

    /// Writes a single byte into `self`.
    fn write_u8(&mut self, value: u8);

    /// Writes a sequence of bytes into `self`.
    fn write_bytes(&mut self, values: &[u8]);

    // PROVIDED METHODS
    // --------------------------------------------------------------------------------------------

    /// Writes a u128 value in little-endian byte order into `self`.
    fn write_u128(&mut self, value: u128) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Writes a usize value in [vint64](https://docs.rs/vint64/latest/vint64/) format into `self`.
    ///
    /// Values smaller than 2^7 take a single byte; values of 57 bits or more take 9 bytes.
    fn write_usize(&mut self, value: usize) {
        let value = value as u64;
        let length = usize_encoded_len(value);

        if length == 9 {
            self.write_u8(0);
            self.write_bytes(&value.to_le_bytes());
        } else {
            let encoded = (value << length) | (1 << (length - 1));
            self.write_bytes(&encoded.to_le_bytes()[..length]);
        }
    }

    /// Writes a serializable value into `self`.
    fn write<S: Serializable>(&mut self, value: S) {
        value.write_into(self)
    }

    /// Serializes all `elements` into `self` without a length prefix.
    fn write_many<S: Serializable>(&mut self, elements: &[S]) {
        for element in elements {
            element.write_into(self);
        }
    }
}

impl ByteWriter for Vec<u8> {
    fn write_u8(&mut self, value: u8) {
        self.push(value);
    }

    fn write_bytes(&mut self, values: &[u8]) {
        self.extend_from_slice(values);
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Returns the number of bytes needed to encode `value` in vint64 format.
pub(super) fn usize_encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    match bits {
        0..=7 => 1,
        57.. => 9,
        _ => bits.div_ceil(7),
    }
}
