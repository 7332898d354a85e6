// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use proptest::prelude::{any, proptest};

use super::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable, SliceReader};

// SLICE READER TESTS
// ================================================================================================

#[test]
fn read_u8() {
    let source = [1u8, 3, 5, 7];
    let mut a = SliceReader::new(&source);

    assert_eq!(1, a.read_u8().unwrap());
    assert_eq!(3, a.read_u8().unwrap());
    assert_eq!(5, a.read_u8().unwrap());
    assert_eq!(7, a.read_u8().unwrap());
    assert!(a.read_u8().is_err());
}

#[test]
fn read_u128() {
    let mut source = 12345678910111213u128.to_le_bytes().to_vec();
    source.extend_from_slice(&u128::MAX.to_le_bytes());
    let mut a = SliceReader::new(&source);

    assert_eq!(12345678910111213, a.read_u128().unwrap());
    assert_eq!(u128::MAX, a.read_u128().unwrap());
    assert_eq!(Err(DeserializationError::UnexpectedEOF), a.read_u128());
}

#[test]
fn read_slice_past_end() {
    let source = [1u8, 2, 3];
    let mut a = SliceReader::new(&source);

    assert_eq!(&[1u8, 2], a.read_slice(2).unwrap());
    assert_eq!(Err(DeserializationError::UnexpectedEOF), a.read_slice(usize::MAX));
    assert_eq!(2, a.position());
    assert!(a.has_more_bytes());
}

// USIZE ENCODING
// ================================================================================================

#[test]
fn usize_encoding_lengths() {
    let cases: [(usize, usize); 6] =
        [(0, 1), (127, 1), (128, 2), (16383, 2), (1 << 56, 9), (usize::MAX, 9)];
    for (value, expected_len) in cases {
        let mut target = Vec::new();
        target.write_usize(value);
        assert_eq!(expected_len, target.len(), "value {value}");
        assert_eq!(expected_len, value.get_size_hint());

        let mut reader = SliceReader::new(&target);
        assert_eq!(value, reader.read_usize().unwrap());
        assert!(!reader.has_more_bytes());
    }
}

proptest! {
    #[test]
    fn usize_serialization(value in any::<usize>()) {
        let bytes = value.to_bytes();
        let decoded = usize::read_from_bytes(&bytes).unwrap();
        proptest::prop_assert_eq!(value, decoded);
    }

    #[test]
    fn u128_serialization(value in any::<u128>()) {
        let bytes = value.to_bytes();
        proptest::prop_assert_eq!(16, bytes.len());
        proptest::prop_assert_eq!(value, u128::read_from_bytes(&bytes).unwrap());
    }
}

// SERIALIZATION TESTS
// ================================================================================================

#[test]
fn write_and_read_values() {
    let mut target: Vec<u8> = Vec::new();
    target.write(7u8);
    target.write(300usize);
    target.write([9u8; 4]);
    assert_eq!(vec![7, 0xb2, 0x04, 9, 9, 9, 9], target);

    let mut reader = SliceReader::new(&target);
    assert_eq!(7u8, reader.read::<u8>().unwrap());
    assert_eq!(300usize, reader.read::<usize>().unwrap());
    assert_eq!([9u8; 4], reader.read::<[u8; 4]>().unwrap());
    assert!(!reader.has_more_bytes());
}

#[test]
fn read_many_values() {
    let values = vec![1u128, 2, 3, 4];
    let bytes = values.to_bytes();
    assert_eq!(64, bytes.len());

    let mut reader = SliceReader::new(&bytes);
    let decoded: Vec<u128> = reader.read_many(4).unwrap();
    assert_eq!(values, decoded);
    assert_eq!(Err(DeserializationError::UnexpectedEOF), reader.read_many::<u128>(1));
}

#[test]
fn read_from_bytes_rejects_trailing_bytes() {
    let bytes = [5u8, 9];
    assert_eq!(Err(DeserializationError::UnconsumedBytes), u8::read_from_bytes(&bytes));
    assert_eq!(Err(DeserializationError::UnexpectedEOF), u128::read_from_bytes(&bytes));
}
