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
use crate::reducer::PresentMultiple;
use crate::reducer::PresentSingle;
use crate::reducer::Reducer;
use crate::slice::Slice;

impl Matrix {
    /// Reduce the cells sharing a selected key to at most one cell
    /// at that key. The result has the rank of the selected part.
    ///
    /// ```
    /// # use ndcube::Content;
    /// # use ndcube::Dimension;
    /// # use ndcube::Matrix;
    /// # use ndcube::Slice;
    /// # use ndcube::library::reducers::Sum;
    /// let m = Matrix::from_pairs(
    ///     2,
    ///     [
    ///         ((1, "a"), Content::discrete(10)),
    ///         ((1, "b"), Content::discrete(20)),
    ///         ((2, "a"), Content::discrete(30)),
    ///     ],
    /// )
    /// .unwrap();
    /// let sums = m.reduce(&Slice::over(Dimension::FIRST, 2).unwrap(), &Sum).unwrap();
    /// assert_eq!(sums.rank(), 1);
    /// assert_eq!(sums.len(), 2);
    /// ```
    pub fn reduce<R: PresentSingle>(
        &self,
        slice: &Slice,
        reducer: &R,
    ) -> Result<Matrix, MatrixError> {
        self.reduce_with_value(slice, reducer, &())
    }

    /// [`Matrix::reduce`] with a broadcast value.
    pub fn reduce_with_value<V: ?Sized, R: PresentSingle<V>>(
        &self,
        slice: &Slice,
        reducer: &R,
        value: &V,
    ) -> Result<Matrix, MatrixError> {
        self.check_slice(slice)?;
        tracing::debug!(operation = "reduce", rank = self.rank, %slice);
        let cells = self
            .aggregate(slice, reducer, value)
            .into_flat_map(|(key, state)| {
                reducer
                    .present_single(&key, state)
                    .map(|content| Cell::new(key, content))
            });
        Ok(Matrix::derived(slice.selected_rank(), cells))
    }

    /// Reduce the cells sharing a selected key to any number of
    /// cells, each at the key extended by one coordinate. The result
    /// has the rank of the selected part plus one.
    pub fn reduce_and_expand<R: PresentMultiple>(
        &self,
        slice: &Slice,
        reducer: &R,
    ) -> Result<Matrix, MatrixError> {
        self.reduce_and_expand_with_value(slice, reducer, &())
    }

    /// [`Matrix::reduce_and_expand`] with a broadcast value.
    pub fn reduce_and_expand_with_value<V: ?Sized, R: PresentMultiple<V>>(
        &self,
        slice: &Slice,
        reducer: &R,
        value: &V,
    ) -> Result<Matrix, MatrixError> {
        self.check_slice(slice)?;
        tracing::debug!(operation = "reduce_and_expand", rank = self.rank, %slice);
        let cells = self
            .aggregate(slice, reducer, value)
            .into_flat_map(|(key, state)| {
                reducer
                    .present_multiple(&key, state)
                    .into_iter()
                    .map(|(coordinate, content)| Cell::new(key.append(coordinate), content))
                    .collect::<Vec<_>>()
            });
        Ok(Matrix::derived(slice.selected_rank() + 1, cells))
    }

    fn aggregate<V: ?Sized, R: Reducer<V>>(
        &self,
        slice: &Slice,
        reducer: &R,
        value: &V,
    ) -> Collection<(Position, R::State)> {
        self.cells
            .map(|cell| {
                (
                    slice.selected(&cell.position),
                    reducer.prepare(slice, cell, value),
                )
            })
            .reduce_by_key(|left, right| reducer.reduce(left, right))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::algebra;
    use crate::algebra::Semigroup;
    use crate::content::Content;
    use crate::library::reducers::Count;
    use crate::library::reducers::Max;
    use crate::library::reducers::Min;
    use crate::library::reducers::Sum;
    use crate::matrix::testing::expect;
    use crate::matrix::testing::rendered;
    use crate::matrix::testing::sales;
    use crate::position::Dimension;
    use crate::reducer::Named;
    use crate::value::Value;

    #[test]
    fn test_reduce_over_and_along() {
        let m = sales();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        assert_eq!(
            rendered(&m.reduce(&over, &Sum).unwrap()),
            expect(&[("north", "30"), ("south", "35")])
        );

        let along = Slice::along(Dimension::FIRST, 2).unwrap();
        assert_eq!(
            rendered(&m.reduce(&along, &Count).unwrap()),
            expect(&[("apple", "2"), ("fig", "1"), ("pear", "1")])
        );
    }

    #[test]
    fn test_undefined_reduction_is_absent() {
        let m = Matrix::from_pairs(
            2,
            [
                ((1, "a"), crate::content::Content::discrete(1)),
                ((2, "a"), crate::content::Content::nominal("x")),
            ],
        )
        .unwrap();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        assert_eq!(rendered(&m.reduce(&over, &Sum).unwrap()), expect(&[("1", "1")]));
    }

    #[test]
    fn test_reduce_and_expand() {
        let m = sales();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        let stats = (
            Named::new("count", Count),
            Named::new("min", Min),
            Named::new("max", Max),
        );
        let expanded = m.reduce_and_expand(&over, &stats).unwrap();
        assert_eq!(expanded.rank(), 2);
        assert_eq!(
            rendered(&expanded),
            expect(&[
                ("north|count", "2"),
                ("north|max", "20"),
                ("north|min", "10"),
                ("south|count", "2"),
                ("south|max", "30"),
                ("south|min", "5"),
            ])
        );
    }

    #[test]
    fn test_rejects_foreign_slice() {
        let m = sales();
        let slice = Slice::over(Dimension::FIRST, 1).unwrap();
        assert!(matches!(
            m.reduce(&slice, &Sum),
            Err(MatrixError::SliceRank { slice: 1, rank: 2 })
        ));
    }

    /// Sum of contents, each scaled by the broadcast weight of its
    /// product. Products without a weight count as zero.
    struct WeightedSum;

    impl Reducer<HashMap<Value, f64>> for WeightedSum {
        type State = algebra::Sum;

        fn prepare(
            &self,
            _slice: &Slice,
            cell: &Cell,
            weights: &HashMap<Value, f64>,
        ) -> Self::State {
            let weight = cell
                .position
                .get(Dimension::SECOND)
                .ok()
                .and_then(|product| weights.get(product))
                .copied()
                .unwrap_or(0.0);
            algebra::Sum(cell.content.as_f64().unwrap_or(0.0) * weight)
        }

        fn reduce(&self, left: Self::State, right: Self::State) -> Self::State {
            left.combine(&right)
        }
    }

    impl PresentSingle<HashMap<Value, f64>> for WeightedSum {
        fn present_single(&self, _key: &Position, state: Self::State) -> Option<Content> {
            Some(Content::continuous(state.0))
        }
    }

    #[test]
    fn test_reduce_with_value() {
        let weights: HashMap<Value, f64> = [(Value::from("apple"), 2.0), (Value::from("pear"), 0.5)]
            .into_iter()
            .collect();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        let weighted = sales()
            .reduce_with_value(&over, &WeightedSum, &weights)
            .unwrap();
        assert_eq!(
            rendered(&weighted),
            expect(&[("north", "30"), ("south", "60")])
        );
    }
}
