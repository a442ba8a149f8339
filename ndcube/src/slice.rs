/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use crate::position::Dimension;
use crate::position::Position;
use crate::position::PositionError;

/// A slice splits a [`Position`] into a *selected* sub-position, used
/// as a grouping key, and a *remainder* sub-position holding the
/// complementary coordinates, used for ordering.
///
/// A slice is built against a rank and records which dimensions are
/// selected. Selected and remainder coordinates both keep dimension
/// order, and the split is invertible:
///
/// ```text
///     reconstruct(selected(p), remainder(p)) == p
/// ```
///
/// The two canonical slices are [`Slice::over`] (select one
/// dimension) and [`Slice::along`] (select all but one dimension).
/// Composite selections over several dimensions are built with
/// [`Slice::over_dims`].
///
/// ```
/// # use ndcube::Dimension;
/// # use ndcube::Position;
/// # use ndcube::Slice;
/// let p = Position::from((1, "a", 2.5));
/// let over = Slice::over(Dimension::SECOND, 3).unwrap();
/// assert_eq!(over.selected(&p), Position::from(("a",)));
/// assert_eq!(over.remainder(&p), Position::from((1, 2.5)));
///
/// let along = over.inverse();
/// assert_eq!(along.selected(&p), Position::from((1, 2.5)));
/// assert_eq!(along.reconstruct(&along.selected(&p), &along.remainder(&p)).unwrap(), p);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slice {
    rank: usize,
    /// Selected dimension indices, ascending and unique.
    selected: Vec<usize>,
}

impl Slice {
    /// Select the single dimension `dim`; the remainder is every other
    /// dimension.
    pub fn over(dim: Dimension, rank: usize) -> Result<Self, PositionError> {
        Ok(Self {
            rank,
            selected: vec![dim.check(rank)?],
        })
    }

    /// Select every dimension except `dim`; the remainder is `dim`.
    pub fn along(dim: Dimension, rank: usize) -> Result<Self, PositionError> {
        Ok(Self::over(dim, rank)?.inverse())
    }

    /// Select several dimensions at once. Duplicates are rejected.
    pub fn over_dims(dims: &[Dimension], rank: usize) -> Result<Self, PositionError> {
        let mut selected = Vec::with_capacity(dims.len());
        for &dim in dims {
            let index = dim.check(rank)?;
            if selected.contains(&index) {
                return Err(PositionError::SameDimension { dim });
            }
            selected.push(index);
        }
        selected.sort_unstable();
        Ok(Self { rank, selected })
    }

    /// The rank of positions this slice applies to.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Zero-based indices of the selected dimensions.
    pub fn selected_dims(&self) -> &[usize] {
        &self.selected
    }

    /// Zero-based indices of the remainder dimensions.
    pub fn remainder_dims(&self) -> Vec<usize> {
        (0..self.rank)
            .filter(|index| !self.selected.contains(index))
            .collect()
    }

    /// Rank of the selected sub-position.
    pub fn selected_rank(&self) -> usize {
        self.selected.len()
    }

    /// Rank of the remainder sub-position.
    pub fn remainder_rank(&self) -> usize {
        self.rank - self.selected.len()
    }

    /// The grouping key of `position`.
    pub fn selected(&self, position: &Position) -> Position {
        position.pick(&self.selected)
    }

    /// The complement of [`Slice::selected`].
    pub fn remainder(&self, position: &Position) -> Position {
        position.pick(&self.remainder_dims())
    }

    /// Rebuild a full position from its selected and remainder parts.
    pub fn reconstruct(
        &self,
        selected: &Position,
        remainder: &Position,
    ) -> Result<Position, PositionError> {
        if selected.rank() != self.selected_rank() {
            return Err(PositionError::RankMismatch {
                expected: self.selected_rank(),
                got: selected.rank(),
            });
        }
        if remainder.rank() != self.remainder_rank() {
            return Err(PositionError::RankMismatch {
                expected: self.remainder_rank(),
                got: remainder.rank(),
            });
        }

        let mut selected = selected.coordinates().iter();
        let mut remainder = remainder.coordinates().iter();
        let coordinates = (0..self.rank)
            .filter_map(|index| {
                if self.selected.contains(&index) {
                    selected.next()
                } else {
                    remainder.next()
                }
            })
            .cloned()
            .collect();
        Ok(Position::new(coordinates))
    }

    /// The complementary slice: selected and remainder swap roles.
    /// `Over(d).inverse()` is `Along(d)` and vice versa.
    pub fn inverse(&self) -> Self {
        Self {
            rank: self.rank,
            selected: self.remainder_dims(),
        }
    }

    /// Check that this slice was built for positions of `rank`.
    pub fn check(&self, rank: usize) -> Result<(), PositionError> {
        if self.rank != rank {
            return Err(PositionError::RankMismatch {
                expected: rank,
                got: self.rank,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |dims: &[usize]| dims.iter().map(|&index| Dimension::at(index)).join(", ");
        match (self.selected.len(), self.remainder_rank()) {
            (1, _) => write!(f, "Over({})", names(&self.selected)),
            (_, 1) => write!(f, "Along({})", names(&self.remainder_dims())),
            _ => write!(f, "Over([{}])", names(&self.selected)),
        }
    }
}
