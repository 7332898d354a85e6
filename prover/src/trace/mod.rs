// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

mod trace_table;
pub use trace_table::TraceTable;

mod validation;
pub(crate) use validation::validate_trace;
