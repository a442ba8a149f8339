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
use crate::position;
use crate::position::Dimension;
use crate::slice::Slice;
use crate::squasher::Squasher;

impl Matrix {
    /// Remove `dim`, keeping one survivor among the cells that
    /// collide on the remaining coordinates. The result has rank
    /// `N - 1`.
    pub fn squash<S: Squasher>(&self, dim: Dimension, squasher: &S) -> Result<Matrix, MatrixError> {
        self.squash_with_value(dim, squasher, &())
    }

    /// [`Matrix::squash`] with a broadcast value.
    pub fn squash_with_value<V: ?Sized, S: Squasher<V>>(
        &self,
        dim: Dimension,
        squasher: &S,
        value: &V,
    ) -> Result<Matrix, MatrixError> {
        self.check_min_rank("squash", 2)?;
        let along = Slice::along(dim, self.rank)?;
        tracing::debug!(operation = "squash", rank = self.rank, %dim);
        let cells = self
            .keyed_by(&along)
            .reduce_by_key(|left, right| squasher.reduce(dim, left, right, value))
            .into_map(|(key, survivor)| Cell::new(key, survivor.content));
        Ok(Matrix::derived(self.rank - 1, cells))
    }

    /// Merge the coordinate at `dim` into the coordinate at `into`
    /// (see [`Position::melt`](crate::Position::melt)). No cells are
    /// combined; the result has rank `N - 1`.
    pub fn melt(
        &self,
        dim: Dimension,
        into: Dimension,
        separator: &str,
    ) -> Result<Matrix, MatrixError> {
        self.check_min_rank("melt", 2)?;
        let (from, to) = position::check_melt(dim, into, self.rank)?;
        tracing::debug!(operation = "melt", rank = self.rank, %dim, %into, separator);
        let cells = self.cells.map(|cell| {
            Cell::new(
                cell.position.merge_at(from, to, separator),
                cell.content.clone(),
            )
        });
        Ok(Matrix::derived(self.rank - 1, cells))
    }

    /// Reorder the dimensions of every position: dimension `i` of the
    /// result is dimension `order[i]` of `self`.
    pub fn permute(&self, order: &[Dimension]) -> Result<Matrix, MatrixError> {
        let indices = position::check_permutation(order, self.rank)?;
        tracing::debug!(operation = "permute", rank = self.rank, ?order);
        let cells = self
            .cells
            .map(|cell| Cell::new(cell.position.pick(&indices), cell.content.clone()));
        Ok(Matrix::derived(self.rank, cells))
    }
}
