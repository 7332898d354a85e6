// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use proptest::prelude::*;
use rand_utils::rand_vector;

use super::{batch_inversion, get_power_series, get_power_series_with_offset};
use crate::{field::f128::BaseElement, FieldElement};

#[test]
fn power_series() {
    let n = 1024 * 4; // big enough for concurrent series generation
    let b = BaseElement::from(3u8);

    let mut expected = vec![BaseElement::ONE; n];
    for i in 1..expected.len() {
        expected[i] = expected[i - 1] * b;
    }

    let actual = get_power_series(b, n);
    assert_eq!(expected, actual);
    assert!(get_power_series(b, 0).is_empty());
}

#[test]
fn power_series_with_offset() {
    let n = 1024 * 4;
    let b = BaseElement::from(3u8);
    let s = BaseElement::from(7u8);

    let mut expected = vec![s; n];
    for i in 1..expected.len() {
        expected[i] = expected[i - 1] * b;
    }

    let actual = get_power_series_with_offset(b, s, n);
    assert_eq!(expected, actual);
}

#[test]
fn batch_inversion_with_zeros() {
    let mut values: Vec<BaseElement> = rand_vector(2048);
    values[7] = BaseElement::ZERO;
    values[1500] = BaseElement::ZERO;

    let actual = batch_inversion(&values);
    for (value, inverse) in values.iter().zip(actual.iter()) {
        assert_eq!(value.inv(), *inverse);
    }
}

proptest! {
    #[test]
    fn batch_inversion_matches_single_inversion(values in prop::collection::vec(any::<u128>(), 1..64)) {
        let values: Vec<BaseElement> = values.into_iter().map(BaseElement::from).collect();
        let expected: Vec<BaseElement> = values.iter().map(|v| v.inv()).collect();
        prop_assert_eq!(expected, batch_inversion(&values));
    }
}
