// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains modules with mathematical operations needed by the Glacier STARK prover
//! and verifier.
//!
//! # Finite fields
//! [FieldElement] and [StarkField] traits define the contract every field used by the protocol
//! must satisfy. A concrete 128-bit field with modulus $407 \cdot 2^{119} + 1$ is provided in the
//! [fields::f128] module.
//!
//! # Polynomials
//! [polynom] module contains functions which operate on polynomials in coefficient form stored
//! as slices, as well as an owned [Polynomial] type with operator overloads, exact division,
//! Lagrange interpolation, zerofiers, scaling and composition.
//!
//! [MultivariatePolynomial] is a sparse polynomial over several variables; it is used to express
//! transition constraints and to turn them into univariate polynomials via symbolic evaluation.
//!
//! # Fast Fourier transform
//! [fft] module contains FFT-based evaluation and interpolation over multiplicative subgroups
//! (and their cosets) whose size is a power of two.
//!
//! # Concurrent execution
//! When the crate is compiled with `concurrent` feature enabled, some operations are executed
//! in multiple threads (via [rayon](https://docs.rs/rayon/latest/rayon/)).

pub mod fft;
pub mod polynom;
pub use polynom::Polynomial;

mod multivariate;
pub use multivariate::MultivariatePolynomial;

mod field;
pub use field::{FieldElement, StarkField};
pub mod fields {
    //! Finite field implementations.
    //!
    //! This module contains concrete implementations of base STARK fields.

    pub use super::field::f128;
}

mod utils;
pub use crate::utils::{batch_inversion, get_power_series, get_power_series_with_offset};

mod errors;
pub use errors::MathError;
