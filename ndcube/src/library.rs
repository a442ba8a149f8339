/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Concrete strategies for each extension point.

/// Pair-derivation and running-total derivers.
pub mod derivers;

/// Arithmetic and concatenating pairwise operators.
pub mod operators;

/// Stable hash splits.
pub mod partitioners;

/// Counting and numeric reducers.
pub mod reducers;

/// Squashers keeping an extremal or given coordinate.
pub mod squashers;

/// Indicator, scaling and binarising transformers.
pub mod transformers;
