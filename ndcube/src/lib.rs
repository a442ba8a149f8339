/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Sparse multidimensional data matrices with a pluggable
//! partitioned execution seam.
//!
//! A [`Matrix`] is a bag of [`Cell`]s, each a [`Position`] (one
//! [`Value`] per dimension) paired with a typed [`Content`]. Every
//! operation is expressed over a [`Collection`], so the same
//! algorithms run whether the collection holds one partition or many.
//!
//! Operations that aggregate or compare cells take a [`Slice`],
//! which splits each position into the dimensions it selects and the
//! remainder. Behavior is supplied through small strategy traits
//! ([`Reducer`], [`Transformer`], [`Deriver`], [`Partitioner`],
//! [`Squasher`], [`Operator`]); ready-made strategies live in
//! [`library`].
//!
//! ```
//! use ndcube::library::reducers::Sum;
//! use ndcube::Content;
//! use ndcube::Dimension;
//! use ndcube::Matrix;
//! use ndcube::Slice;
//!
//! let m = Matrix::from_pairs(
//!     2,
//!     [((1, "a"), Content::discrete(10)), ((1, "b"), Content::discrete(20))],
//! )
//! .unwrap();
//! let totals = m.reduce(&Slice::over(Dimension::FIRST, 2).unwrap(), &Sum).unwrap();
//! assert_eq!(totals.rank(), 1);
//! ```

/// Semigroups and monoids for reducer states.
pub mod algebra;

/// Partitioned collections.
pub mod collection;

/// Process-wide configuration.
pub mod config;

/// Built-in strategies.
pub mod library;

mod cell;
mod content;
mod deriver;
mod matrix;
mod names;
mod operator;
mod partitioner;
mod partitions;
mod position;
mod reducer;
mod slice;
mod squasher;
mod transformer;
mod value;

pub use cell::Cell;
pub use collection::Collection;
pub use collection::NonEmpty;
pub use config::Config;
pub use content::Content;
pub use content::Kind;
pub use content::Schema;
pub use deriver::Deriver;
pub use matrix::CellPredicate;
pub use matrix::Matrix;
pub use matrix::MatrixError;
pub use names::Names;
pub use operator::Comparer;
pub use operator::Operator;
pub use operator::pair_label;
pub use partitioner::Partitioner;
pub use partitions::Partitions;
pub use position::Dimension;
pub use position::Position;
pub use position::PositionError;
pub use reducer::Named;
pub use reducer::PresentMultiple;
pub use reducer::PresentSingle;
pub use reducer::Reducer;
pub use slice::Slice;
pub use squasher::Squasher;
pub use transformer::ExpandingTransformer;
pub use transformer::Transformer;
pub use value::DATE_FORMAT;
pub use value::DATE_TIME_FORMAT;
pub use value::Value;

/// Property-based generators for randomized test input.
#[cfg(test)]
pub mod strategy;
