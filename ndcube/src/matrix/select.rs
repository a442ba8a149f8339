/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use super::Matrix;
use super::MatrixError;
use crate::cell::Cell;
use crate::collection::Collection;
use crate::position::Position;
use crate::slice::Slice;

/// A predicate over cells, as used by [`Matrix::which_by`].
pub type CellPredicate<'a> = &'a dyn Fn(&Cell) -> bool;

impl Matrix {
    /// Keep the cells whose selected key is in `positions` (or, if
    /// `keep` is false, is not).
    ///
    /// The complement is computed as the set difference between the
    /// matrix's own keys and `positions`, so `positions` may itself be
    /// the output of another operator.
    pub fn slice(
        &self,
        slice: &Slice,
        positions: &Collection<Position>,
        keep: bool,
    ) -> Result<Matrix, MatrixError> {
        self.check_slice(slice)?;
        tracing::debug!(operation = "slice", rank = self.rank, %slice, keep);
        let requested = positions.clone().distinct();
        let wanted = if keep {
            requested
        } else {
            self.cells
                .map(|cell| slice.selected(&cell.position))
                .distinct()
                .into_map(|key| (key, ()))
                .left_join(requested.into_map(|key| (key, ())))
                .into_flat_map(|(key, ((), matched))| matched.is_none().then_some(key))
        };
        let cells = self
            .keyed_by(slice)
            .join(wanted.into_map(|key| (key, ())))
            .into_map(|(_, (cell, ()))| cell);
        Ok(Matrix::derived(self.rank, cells))
    }

    /// Positions of the cells satisfying `predicate`.
    pub fn which(&self, predicate: impl Fn(&Cell) -> bool) -> Collection<Position> {
        tracing::debug!(operation = "which", rank = self.rank);
        self.cells
            .flat_map(|cell| predicate(cell).then(|| cell.position.clone()))
    }

    /// Evaluate several predicates, each restricted to the cells whose
    /// selected key is in its position set, and concatenate the
    /// matches. A position matched by several predicates is returned
    /// once per match.
    pub fn which_by(
        &self,
        slice: &Slice,
        queries: &[(Collection<Position>, CellPredicate<'_>)],
    ) -> Result<Collection<Position>, MatrixError> {
        self.check_slice(slice)?;
        tracing::debug!(operation = "which_by", rank = self.rank, %slice, queries = queries.len());
        queries
            .iter()
            .try_fold(
                Collection::empty(),
                |matches, (positions, predicate)| -> Result<_, MatrixError> {
                    let restricted = self.slice(slice, positions, true)?;
                    Ok(matches.union(restricted.which(predicate)))
                },
            )
    }

    /// The cells at exactly `positions`.
    pub fn get(&self, positions: &Collection<Position>) -> Matrix {
        tracing::debug!(operation = "get", rank = self.rank);
        let cells = self
            .cells
            .map(|cell| (cell.position.clone(), cell.clone()))
            .join(positions.clone().distinct().into_map(|position| (position, ())))
            .into_map(|(_, (cell, ()))| cell);
        Matrix::derived(self.rank, cells)
    }
}
