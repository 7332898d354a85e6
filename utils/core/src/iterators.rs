// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Macros which switch between serial and parallel iteration.
//!
//! With the `concurrent` feature this module re-exports `rayon::prelude`, and the macros below
//! expand into rayon parallel iterators. Without it the module is empty and the macros expand
//! into regular iterators, so callers compile the same way in both configurations.

#[cfg(feature = "concurrent")]
pub use rayon::{current_num_threads as rayon_num_threads, prelude::*};

/// Iterates over `$e` by reference; in parallel when `concurrent` feature is enabled.
///
/// The optional second argument sets the minimum number of items processed by a single thread.
#[macro_export]
macro_rules! iter {
    ($e:expr) => {{
        #[cfg(feature = "concurrent")]
        let result = $e.par_iter();

        #[cfg(not(feature = "concurrent"))]
        let result = $e.iter();

        result
    }};
    ($e:expr, $min_len:expr) => {{
        #[cfg(feature = "concurrent")]
        let result = $e.par_iter().with_min_len($min_len);

        #[cfg(not(feature = "concurrent"))]
        let result = $e.iter();

        result
    }};
}

/// Iterates over `$e` by mutable reference; in parallel when `concurrent` feature is enabled.
///
/// The optional second argument sets the minimum number of items processed by a single thread.
#[macro_export]
macro_rules! iter_mut {
    ($e:expr) => {{
        #[cfg(feature = "concurrent")]
        let result = $e.par_iter_mut();

        #[cfg(not(feature = "concurrent"))]
        let result = $e.iter_mut();

        result
    }};
    ($e:expr, $min_len:expr) => {{
        #[cfg(feature = "concurrent")]
        let result = $e.par_iter_mut().with_min_len($min_len);

        #[cfg(not(feature = "concurrent"))]
        let result = $e.iter_mut();

        result
    }};
}

/// Calls `$c(batch, batch_offset)` on consecutive batches of the mutable slice `$e`.
///
/// With `concurrent` feature the slice is split into one batch per thread (rounded to a power
/// of two), unless batches would be smaller than `$min_batch_size`; otherwise the whole slice
/// is passed as a single batch with offset 0.
#[macro_export]
macro_rules! batch_iter_mut {
    ($e: expr, $min_batch_size: expr, $c: expr) => {
        #[cfg(feature = "concurrent")]
        {
            let batch_size = $e.len() / rayon_num_threads().next_power_of_two();
            if batch_size < $min_batch_size {
                $c($e, 0);
            } else {
                $e.par_chunks_mut(batch_size).enumerate().for_each(|(i, batch)| {
                    $c(batch, i * batch_size);
                });
            }
        }

        #[cfg(not(feature = "concurrent"))]
        $c($e, 0);
    };
}
