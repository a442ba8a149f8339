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
use crate::operator::Comparer;
use crate::operator::Operator;
use crate::position::Position;
use crate::slice::Slice;

impl Matrix {
    /// Apply `operator` to every pair of cells that share a remainder
    /// and whose selected keys `comparer` keeps.
    ///
    /// Outputs are placed at the shared remainder prefixed with the
    /// coordinate the operator returns, so the result has the rank of
    /// the remainder plus one. The work is quadratic in the number of
    /// keys per remainder.
    pub fn pairwise<O: Operator>(
        &self,
        slice: &Slice,
        comparer: Comparer,
        operator: &O,
    ) -> Result<Matrix, MatrixError> {
        self.pairwise_with_value(slice, comparer, operator, &())
    }

    /// [`Matrix::pairwise`] with a broadcast value.
    pub fn pairwise_with_value<V: ?Sized, O: Operator<V>>(
        &self,
        slice: &Slice,
        comparer: Comparer,
        operator: &O,
        value: &V,
    ) -> Result<Matrix, MatrixError> {
        self.check_slice(slice)?;
        tracing::debug!(operation = "pairwise", rank = self.rank, %slice, ?comparer);
        let by_remainder = self.keyed_by_remainder(slice);
        let cells = compute(slice, comparer, operator, value, by_remainder.clone(), by_remainder);
        Ok(Matrix::derived(slice.remainder_rank() + 1, cells))
    }

    /// [`Matrix::pairwise`] between the cells of `self` (left) and
    /// those of `that` (right).
    pub fn pairwise_between<O: Operator>(
        &self,
        slice: &Slice,
        comparer: Comparer,
        that: &Matrix,
        operator: &O,
    ) -> Result<Matrix, MatrixError> {
        self.pairwise_between_with_value(slice, comparer, that, operator, &())
    }

    /// [`Matrix::pairwise_between`] with a broadcast value.
    pub fn pairwise_between_with_value<V: ?Sized, O: Operator<V>>(
        &self,
        slice: &Slice,
        comparer: Comparer,
        that: &Matrix,
        operator: &O,
        value: &V,
    ) -> Result<Matrix, MatrixError> {
        self.check_slice(slice)?;
        self.check_rank(that)?;
        tracing::debug!(operation = "pairwise_between", rank = self.rank, %slice, ?comparer);
        let cells = compute(
            slice,
            comparer,
            operator,
            value,
            self.keyed_by_remainder(slice),
            that.keyed_by_remainder(slice),
        );
        Ok(Matrix::derived(slice.remainder_rank() + 1, cells))
    }

    fn keyed_by_remainder(&self, slice: &Slice) -> Collection<(Position, Cell)> {
        self.cells
            .map(|cell| (slice.remainder(&cell.position), cell.clone()))
    }
}

fn compute<V: ?Sized, O: Operator<V>>(
    slice: &Slice,
    comparer: Comparer,
    operator: &O,
    value: &V,
    left: Collection<(Position, Cell)>,
    right: Collection<(Position, Cell)>,
) -> Collection<Cell> {
    left.join(right)
        .into_flat_map(|(remainder, (left, right))| {
            if !comparer.keep(
                &slice.selected(&left.position),
                &slice.selected(&right.position),
            ) {
                return Vec::new();
            }
            operator
                .compute(slice, &left, &right, &remainder, value)
                .into_iter()
                .map(|(coordinate, content)| Cell::new(remainder.prepend(coordinate), content))
                .collect()
        })
}
