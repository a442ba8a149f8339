/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Sparse, labeled N-dimensional matrices.
//!
//! A [`Matrix`] is an unordered [`Collection`] of [`Cell`]s of a
//! single rank. The operator set is implemented once, for every rank:
//! operators validate their dimension and slice arguments against the
//! matrix rank before building any collection work, and fail fast
//! with a [`MatrixError`]. Contents that fail to decode and
//! aggregates a strategy cannot present surface as missing cells,
//! never as errors.
//!
//! Operators never mutate a matrix; they return a new one. The rank
//! of the result follows from the operator (e.g. a reduction yields
//! the rank of the slice's selected part), not from the strategy
//! that computed the contents.
//!
//! The operator set is split by concern:
//!
//! - introspection: `names`, `types`, `size`, `shape`, `domain`,
//!   `unique`, `unique_by_slice`;
//! - selection: `slice`, `which`, `which_by`, `get`;
//! - reduction: `reduce`, `reduce_and_expand`;
//! - derivation: `derive`;
//! - pairwise: `pairwise`, `pairwise_between`;
//! - reshape: `squash`, `melt`, `permute`;
//! - mutation: `fill`, `fill_by`, `set`, `change`, `rename`,
//!   `transform`, `transform_and_expand`, `expand`;
//! - partitioning: `partition`, `join`.
//!
//! Every strategy-driven operator has a `_with_value` variant that
//! hands a fully computed broadcast value to the strategy.

use crate::cell::Cell;
use crate::collection::Collection;
use crate::content::Content;
use crate::position::Position;
use crate::position::PositionError;
use crate::slice::Slice;

mod derive;
mod introspect;
mod mutate;
mod pairwise;
mod partition;
mod reduce;
mod reshape;
mod select;

pub use select::CellPredicate;

/// The type of error for matrix operators.
#[derive(Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum MatrixError {
    #[error("slice for {slice}-dimensional positions applied to a {rank}-dimensional matrix")]
    SliceRank { slice: usize, rank: usize },

    #[error("cell {position} has rank {got}, expected {expected}")]
    CellRank {
        position: Position,
        expected: usize,
        got: usize,
    },

    #[error("{operation} requires at least {min} dimensions, got {rank}")]
    TooFewDimensions {
        operation: &'static str,
        min: usize,
        rank: usize,
    },

    #[error(transparent)]
    Position(#[from] PositionError),
}

/// A sparse matrix of cells of equal rank.
#[derive(Clone, Debug)]
pub struct Matrix {
    rank: usize,
    cells: Collection<Cell>,
}

impl Matrix {
    /// Build a matrix from cells, checking that every position has
    /// rank `rank`.
    pub fn from_cells(rank: usize, cells: Vec<Cell>) -> Result<Self, MatrixError> {
        Self::from_collection(rank, Collection::new(cells))
    }

    /// Build a matrix over an existing collection of cells, checking
    /// that every position has rank `rank`.
    pub fn from_collection(rank: usize, cells: Collection<Cell>) -> Result<Self, MatrixError> {
        if let Some(cell) = cells.iter().find(|cell| cell.position.rank() != rank) {
            return Err(MatrixError::CellRank {
                position: cell.position.clone(),
                expected: rank,
                got: cell.position.rank(),
            });
        }
        Ok(Self { rank, cells })
    }

    /// Build a matrix from `(position, content)` pairs.
    ///
    /// ```
    /// # use ndcube::Content;
    /// # use ndcube::Matrix;
    /// let m = Matrix::from_pairs(2, [((1, "a"), Content::discrete(10))]).unwrap();
    /// assert_eq!(m.len(), 1);
    /// ```
    pub fn from_pairs<P, I>(rank: usize, pairs: I) -> Result<Self, MatrixError>
    where
        P: Into<Position>,
        I: IntoIterator<Item = (P, Content)>,
    {
        Self::from_cells(
            rank,
            pairs
                .into_iter()
                .map(|(position, content)| Cell::new(position, content))
                .collect(),
        )
    }

    /// A matrix whose cell ranks follow from the operator that built
    /// them.
    pub(crate) fn derived(rank: usize, cells: Collection<Cell>) -> Self {
        Self { rank, cells }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn cells(&self) -> &Collection<Cell> {
        &self.cells
    }

    pub fn into_cells(self) -> Collection<Cell> {
        self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, ordered by position.
    pub fn to_sorted_vec(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells.iter().cloned().collect();
        cells.sort_by(|left, right| left.position.cmp(&right.position));
        cells
    }

    fn check_slice(&self, slice: &Slice) -> Result<(), MatrixError> {
        if slice.rank() != self.rank {
            return Err(MatrixError::SliceRank {
                slice: slice.rank(),
                rank: self.rank,
            });
        }
        Ok(())
    }

    fn check_rank(&self, other: &Matrix) -> Result<(), MatrixError> {
        if other.rank != self.rank {
            return Err(PositionError::RankMismatch {
                expected: self.rank,
                got: other.rank,
            }
            .into());
        }
        Ok(())
    }

    fn check_min_rank(&self, operation: &'static str, min: usize) -> Result<(), MatrixError> {
        if self.rank < min {
            return Err(MatrixError::TooFewDimensions {
                operation,
                min,
                rank: self.rank,
            });
        }
        Ok(())
    }

    /// Cells keyed by the selected part of their position.
    fn keyed_by(&self, slice: &Slice) -> Collection<(Position, Cell)> {
        self.cells
            .map(|cell| (slice.selected(&cell.position), cell.clone()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Dimension;

    #[test]
    fn test_from_cells_checks_rank() {
        let err = Matrix::from_pairs(
            2,
            [
                (Position::from((1, "a")), Content::discrete(1)),
                (Position::from((1,)), Content::discrete(2)),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MatrixError::CellRank {
                position: Position::from((1,)),
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_slice_rank_is_checked() {
        let m = Matrix::from_pairs(2, [((1, "a"), Content::discrete(1))]).unwrap();
        let slice = Slice::over(Dimension::FIRST, 3).unwrap();
        assert_eq!(
            m.check_slice(&slice),
            Err(MatrixError::SliceRank { slice: 3, rank: 2 })
        );
    }
}
