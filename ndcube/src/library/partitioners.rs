/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Deterministic splits on the stable hash of a coordinate.
//!
//! The bucket of a cell is `|hash_code(coordinate) % base|`, where the
//! coordinate is taken at the splitter's dimension. Cells lacking
//! that dimension are not assigned. Splitters are validated when
//! they are built, so assignment never fails.

use crate::cell::Cell;
use crate::partitioner::Partitioner;
use crate::position::Dimension;

/// The type of error for hash splitter construction.
#[derive(Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum HashSplitError {
    #[error("hash base must be positive, got {base}")]
    NonPositiveBase { base: i64 },

    #[error("lower bound {lower} exceeds upper bound {upper}")]
    InvertedBounds { lower: i64, upper: i64 },
}

fn check_base(base: i64) -> Result<i64, HashSplitError> {
    if base <= 0 {
        return Err(HashSplitError::NonPositiveBase { base });
    }
    Ok(base)
}

fn bucket(cell: &Cell, dim: Dimension, base: i64) -> Option<i64> {
    let coordinate = cell.position.get(dim).ok()?;
    Some((coordinate.hash_code() % base).abs())
}

/// Two-way split: `left` for buckets up to `ratio`, `right` above.
#[derive(Clone, Debug)]
pub struct BinaryHashSplit<L> {
    dim: Dimension,
    ratio: i64,
    left: L,
    right: L,
    base: i64,
}

impl<L> BinaryHashSplit<L> {
    /// Fails if `base` is not positive.
    pub fn new(
        dim: Dimension,
        ratio: i64,
        left: L,
        right: L,
        base: i64,
    ) -> Result<Self, HashSplitError> {
        Ok(Self {
            dim,
            ratio,
            left,
            right,
            base: check_base(base)?,
        })
    }
}

impl<V: ?Sized, L: Clone> Partitioner<V> for BinaryHashSplit<L> {
    type Label = L;

    fn assign(&self, cell: &Cell, _value: &V) -> Vec<L> {
        match bucket(cell, self.dim, self.base) {
            Some(bucket) if bucket <= self.ratio => vec![self.left.clone()],
            Some(_) => vec![self.right.clone()],
            None => Vec::new(),
        }
    }
}

/// Three-way split: `left` for buckets up to `lower`, `middle` up to
/// `upper`, `right` above.
#[derive(Clone, Debug)]
pub struct TernaryHashSplit<L> {
    dim: Dimension,
    lower: i64,
    upper: i64,
    left: L,
    middle: L,
    right: L,
    base: i64,
}

impl<L> TernaryHashSplit<L> {
    /// Fails if `base` is not positive or `lower` exceeds `upper`.
    pub fn new(
        dim: Dimension,
        lower: i64,
        upper: i64,
        left: L,
        middle: L,
        right: L,
        base: i64,
    ) -> Result<Self, HashSplitError> {
        let base = check_base(base)?;
        if lower > upper {
            return Err(HashSplitError::InvertedBounds { lower, upper });
        }
        Ok(Self {
            dim,
            lower,
            upper,
            left,
            middle,
            right,
            base,
        })
    }
}

impl<V: ?Sized, L: Clone> Partitioner<V> for TernaryHashSplit<L> {
    type Label = L;

    fn assign(&self, cell: &Cell, _value: &V) -> Vec<L> {
        match bucket(cell, self.dim, self.base) {
            Some(bucket) if bucket <= self.lower => vec![self.left.clone()],
            Some(bucket) if bucket <= self.upper => vec![self.middle.clone()],
            Some(_) => vec![self.right.clone()],
            None => Vec::new(),
        }
    }
}
