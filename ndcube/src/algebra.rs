/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Algebraic structures for distributed aggregation.
//!
//! A reduction over a distributed collection combines partial
//! aggregates in whatever order and grouping the engine picks. The
//! result is well defined only if the combine operation is
//! associative and commutative, i.e. partial aggregates form a
//! commutative semigroup. This module names those laws and provides
//! the numeric aggregates used by the built-in reducers.
//!
//! # Core Concepts
//!
//! - **Semigroup**: A type with an associative binary operation
//!   (`combine`).
//!
//! - **Monoid**: A semigroup with an identity element (`empty`).
//!
//! - **CommutativeMonoid**: A monoid where combine is commutative.
//!   This is the contract of every [`Reducer`](crate::Reducer) state.
//!
//! # Examples
//!
//! ```
//! use ndcube::algebra::Max;
//! use ndcube::algebra::Monoid;
//! use ndcube::algebra::Semigroup;
//!
//! let a = Max(5.0);
//! let b = Max(10.0);
//! assert_eq!(a.combine(&b), Max(10.0));
//! assert_eq!(a.combine(&Max::empty()), a);
//! ```

mod primitives;

pub use primitives::Count;
pub use primitives::Max;
pub use primitives::Min;
pub use primitives::Sum;

/// A **semigroup**: a type with an associative binary operation.
///
/// Laws (not enforced by type system):
///
/// - **Associative**:
///   `a.combine(b).combine(c) == a.combine(b.combine(c))`
pub trait Semigroup: Sized {
    /// Combine two elements associatively.
    fn combine(&self, other: &Self) -> Self;

    /// In-place combine.
    fn combine_assign(&mut self, other: &Self) {
        *self = self.combine(other);
    }
}

/// A **monoid**: a semigroup with an identity element.
///
/// Laws (not enforced by type system):
///
/// - **Associative**:
///   `a.combine(b).combine(c) == a.combine(b.combine(c))`
/// - **Identity**: `empty().combine(a) == a == a.combine(empty())`
pub trait Monoid: Semigroup {
    /// The identity element.
    fn empty() -> Self;

    /// Fold an iterator using combine, starting from empty.
    fn concat<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        iter.into_iter()
            .fold(Self::empty(), |acc, x| acc.combine(&x))
    }
}

/// A **commutative monoid**: a monoid where combine is commutative.
///
/// Additional law:
/// - **Commutative**: `a.combine(b) == b.combine(a)`
pub trait CommutativeMonoid: Monoid {}

impl<A: Semigroup, B: Semigroup> Semigroup for (A, B) {
    fn combine(&self, other: &Self) -> Self {
        (self.0.combine(&other.0), self.1.combine(&other.1))
    }
}

impl<A: Monoid, B: Monoid> Monoid for (A, B) {
    fn empty() -> Self {
        (A::empty(), B::empty())
    }
}

impl<A: CommutativeMonoid, B: CommutativeMonoid> CommutativeMonoid for (A, B) {}
