/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Numeric aggregates.
//!
//! The floating point aggregates treat NaN as absorbing: once a NaN
//! enters a combination it survives every further combine. Reducers
//! use this to mark an aggregate as undefined (e.g. non-numeric
//! content) without breaking commutativity.

use serde::Deserialize;
use serde::Serialize;

use super::CommutativeMonoid;
use super::Monoid;
use super::Semigroup;

/// Number of elements; `combine` adds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Count(pub u64);

impl Semigroup for Count {
    fn combine(&self, other: &Self) -> Self {
        Count(self.0 + other.0)
    }
}

impl Monoid for Count {
    fn empty() -> Self {
        Count(0)
    }
}

impl CommutativeMonoid for Count {}

/// Sum of reals; `combine` adds. Bottom is `0.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sum(pub f64);

impl Semigroup for Sum {
    fn combine(&self, other: &Self) -> Self {
        Sum(self.0 + other.0)
    }
}

impl Monoid for Sum {
    fn empty() -> Self {
        Sum(0.0)
    }
}

impl CommutativeMonoid for Sum {}

/// Maximum of reals. Identity is `-inf`; NaN absorbs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Max(pub f64);

impl Semigroup for Max {
    fn combine(&self, other: &Self) -> Self {
        if self.0.is_nan() || other.0.is_nan() {
            Max(f64::NAN)
        } else {
            Max(self.0.max(other.0))
        }
    }
}

impl Monoid for Max {
    fn empty() -> Self {
        Max(f64::NEG_INFINITY)
    }
}

impl CommutativeMonoid for Max {}

/// Minimum of reals. Identity is `+inf`; NaN absorbs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Min(pub f64);

impl Semigroup for Min {
    fn combine(&self, other: &Self) -> Self {
        if self.0.is_nan() || other.0.is_nan() {
            Min(f64::NAN)
        } else {
            Min(self.0.min(other.0))
        }
    }
}

impl Monoid for Min {
    fn empty() -> Self {
        Min(f64::INFINITY)
    }
}

impl CommutativeMonoid for Min {}
