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
use crate::content::Content;
use crate::content::Schema;
use crate::position::Dimension;
use crate::position::Position;
use crate::position::PositionError;
use crate::slice::Slice;
use crate::transformer::ExpandingTransformer;
use crate::transformer::Transformer;
use crate::value::Value;

impl Matrix {
    /// Make the matrix dense: every position of [`Matrix::domain`]
    /// without a cell gets `content`.
    pub fn fill(&self, content: &Content) -> Matrix {
        tracing::debug!(operation = "fill", rank = self.rank);
        let cells = self
            .domain()
            .into_map(|position| (position, ()))
            .left_join(
                self.cells
                    .map(|cell| (cell.position.clone(), cell.content.clone())),
            )
            .into_map(|(position, ((), existing))| {
                Cell::new(position, existing.unwrap_or_else(|| content.clone()))
            });
        Matrix::derived(self.rank, cells)
    }

    /// Make the matrix dense with per-key contents: a missing position
    /// gets the content of its selected key in `values`, a matrix of
    /// the selected part's rank. Missing positions whose key has no
    /// value stay missing.
    pub fn fill_by(&self, slice: &Slice, values: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_slice(slice)?;
        if values.rank != slice.selected_rank() {
            return Err(PositionError::RankMismatch {
                expected: slice.selected_rank(),
                got: values.rank,
            }
            .into());
        }
        tracing::debug!(operation = "fill_by", rank = self.rank, %slice);
        let filled = self
            .missing()
            .into_map(|position| (slice.selected(&position), position))
            .join(
                values
                    .cells
                    .map(|cell| (cell.position.clone(), cell.content.clone())),
            )
            .into_map(|(_, (position, content))| Cell::new(position, content));
        Ok(Matrix::derived(self.rank, self.cells.clone().union(filled)))
    }

    /// Positions of the domain without a cell.
    fn missing(&self) -> Collection<Position> {
        self.domain()
            .into_map(|position| (position, ()))
            .left_join(self.cells.map(|cell| (cell.position.clone(), ())))
            .into_flat_map(|(position, ((), existing))| existing.is_none().then_some(position))
    }

    /// Insert `cells`, replacing the cells at the same positions.
    pub fn set(&self, cells: &Collection<Cell>) -> Result<Matrix, MatrixError> {
        let update = Matrix::from_collection(self.rank, cells.clone())?;
        tracing::debug!(operation = "set", rank = self.rank, cells = update.len());
        let cells = self
            .cells
            .map(|cell| (cell.position.clone(), (false, cell.clone())))
            .union(update.cells.into_map(|cell| (cell.position.clone(), (true, cell))))
            .reduce_by_key(|left, right| if right.0 && !left.0 { right } else { left })
            .into_map(|(_, (_, cell))| cell);
        Ok(Matrix::derived(self.rank, cells))
    }

    /// Re-decode the contents of the cells whose selected key is in
    /// `positions` under `schema`. A content that does not decode
    /// drops its cell.
    pub fn change(
        &self,
        slice: &Slice,
        positions: &Collection<Position>,
        schema: &Schema,
    ) -> Result<Matrix, MatrixError> {
        self.check_slice(slice)?;
        tracing::debug!(operation = "change", rank = self.rank, %slice, %schema);
        let cells = self
            .keyed_by(slice)
            .left_join(positions.clone().distinct().into_map(|key| (key, ())))
            .into_flat_map(|(_, (cell, matched))| {
                if matched.is_none() {
                    return Some(cell);
                }
                match schema.decode(&cell.content.to_short_string()) {
                    Some(content) => Some(Cell::new(cell.position, content)),
                    None => {
                        tracing::debug!(
                            position = %cell.position,
                            content = %cell.content,
                            %schema,
                            "dropping cell that does not decode"
                        );
                        None
                    }
                }
            });
        Ok(Matrix::derived(self.rank, cells))
    }

    /// Replace the coordinate at `dim` of every cell for which
    /// `rename` returns a new coordinate.
    pub fn rename(
        &self,
        dim: Dimension,
        rename: impl Fn(&Cell) -> Option<Value>,
    ) -> Result<Matrix, MatrixError> {
        let index = dim.check(self.rank)?;
        tracing::debug!(operation = "rename", rank = self.rank, %dim);
        let cells = self.cells.map(|cell| match rename(cell) {
            Some(coordinate) => Cell::new(
                cell.position.replace_at(index, coordinate),
                cell.content.clone(),
            ),
            None => cell.clone(),
        });
        Ok(Matrix::derived(self.rank, cells))
    }

    /// Rewrite every content with `transformer`; positions are kept.
    pub fn transform<T: Transformer>(&self, transformer: &T) -> Matrix {
        self.transform_with_value(transformer, &())
    }

    /// [`Matrix::transform`] with a broadcast value.
    pub fn transform_with_value<V: ?Sized, T: Transformer<V>>(
        &self,
        transformer: &T,
        value: &V,
    ) -> Matrix {
        tracing::debug!(operation = "transform", rank = self.rank);
        let cells = self.cells.flat_map(|cell| {
            transformer
                .present(cell, value)
                .map(|content| Cell::new(cell.position.clone(), content))
        });
        Matrix::derived(self.rank, cells)
    }

    /// Rewrite every content into any number of contents, each at the
    /// cell's position extended with one coordinate.
    pub fn transform_and_expand<T: ExpandingTransformer>(&self, transformer: &T) -> Matrix {
        self.transform_and_expand_with_value(transformer, &())
    }

    /// [`Matrix::transform_and_expand`] with a broadcast value.
    pub fn transform_and_expand_with_value<V: ?Sized, T: ExpandingTransformer<V>>(
        &self,
        transformer: &T,
        value: &V,
    ) -> Matrix {
        tracing::debug!(operation = "transform_and_expand", rank = self.rank);
        let cells = self.cells.flat_map(|cell| {
            transformer
                .present_expanded(cell, value)
                .into_iter()
                .map(|(coordinate, content)| Cell::new(cell.position.append(coordinate), content))
                .collect::<Vec<_>>()
        });
        Matrix::derived(self.rank + 1, cells)
    }

    /// Append the coordinate `expand` computes to every position.
    pub fn expand(&self, expand: impl Fn(&Cell) -> Value) -> Matrix {
        tracing::debug!(operation = "expand", rank = self.rank);
        let cells = self
            .cells
            .map(|cell| Cell::new(cell.position.append(expand(cell)), cell.content.clone()));
        Matrix::derived(self.rank + 1, cells)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;
    use tracing_test::traced_test;

    use super::*;
    use crate::library::transformers::Binarise;
    use crate::library::transformers::Indicator;
    use crate::library::transformers::Normalise;
    use crate::matrix::testing::expect;
    use crate::matrix::testing::rendered;
    use crate::matrix::testing::sales;
    use crate::strategy::gen_cells;

    #[test]
    fn test_fill() {
        let filled = sales().fill(&Content::discrete(0));
        assert_eq!(
            rendered(&filled),
            expect(&[
                ("north|apple", "10"),
                ("north|fig", "0"),
                ("north|pear", "20"),
                ("south|apple", "30"),
                ("south|fig", "5"),
                ("south|pear", "0"),
            ])
        );
    }

    #[test]
    fn test_fill_by() {
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        let defaults = Matrix::from_pairs(1, [(("north",), Content::discrete(-1))]).unwrap();
        assert_eq!(
            rendered(&sales().fill_by(&over, &defaults).unwrap()),
            expect(&[
                ("north|apple", "10"),
                ("north|fig", "-1"),
                ("north|pear", "20"),
                ("south|apple", "30"),
                ("south|fig", "5"),
            ])
        );
        assert!(sales().fill_by(&over, &sales()).is_err());
    }

    #[test]
    fn test_set() {
        let update: Collection<Cell> = vec![
            Cell::new(("north", "apple"), Content::discrete(11)),
            Cell::new(("north", "kiwi"), Content::discrete(1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            rendered(&sales().set(&update).unwrap()),
            expect(&[
                ("north|apple", "11"),
                ("north|kiwi", "1"),
                ("north|pear", "20"),
                ("south|apple", "30"),
                ("south|fig", "5"),
            ])
        );

        let wrong: Collection<Cell> = vec![Cell::new(("x",), Content::discrete(1))]
            .into_iter()
            .collect();
        assert!(sales().set(&wrong).is_err());
    }

    #[test]
    #[traced_test]
    fn test_change_drops_undecodable() {
        let m = Matrix::from_pairs(
            2,
            [
                ((1, "a"), Content::nominal("3")),
                ((1, "b"), Content::nominal("x")),
                ((2, "a"), Content::nominal("4")),
            ],
        )
        .unwrap();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        let positions: Collection<Position> = vec![Position::from((1,))].into_iter().collect();
        let changed = m.change(&over, &positions, &Schema::discrete()).unwrap();
        let cells = changed.to_sorted_vec();
        assert_eq!(
            cells,
            vec![
                Cell::new((1, "a"), Content::discrete(3)),
                Cell::new((2, "a"), Content::nominal("4")),
            ]
        );
        assert!(logs_contain("dropping cell that does not decode"));
    }

    #[test]
    fn test_rename() {
        let renamed = sales()
            .rename(Dimension::SECOND, |cell| {
                (cell.position.coordinates()[1] == Value::from("fig")).then(|| Value::from("figs"))
            })
            .unwrap();
        assert_eq!(
            rendered(&renamed),
            expect(&[
                ("north|apple", "10"),
                ("north|pear", "20"),
                ("south|apple", "30"),
                ("south|figs", "5"),
            ])
        );
        assert!(sales().rename(Dimension::THIRD, |_| None).is_err());
    }

    #[test]
    fn test_transforms() {
        let m = Matrix::from_pairs(
            2,
            [
                (("a", "x"), Content::discrete(4)),
                (("b", "x"), Content::discrete(6)),
                (("a", "colour"), Content::nominal("red")),
            ],
        )
        .unwrap();

        assert_eq!(
            rendered(&m.transform(&Indicator)),
            expect(&[("a|colour", "1"), ("a|x", "1"), ("b|x", "1")])
        );

        let scale: HashMap<Value, f64> = [(Value::from("x"), 2.0)].into_iter().collect();
        let normalised = m.transform_with_value(&Normalise::new(Dimension::SECOND), &scale);
        assert_eq!(
            rendered(&normalised),
            expect(&[("a|x", "2"), ("b|x", "3")])
        );

        let expanded = m.transform_and_expand(&Binarise);
        assert_eq!(expanded.rank(), 3);
        assert_eq!(rendered(&expanded), expect(&[("a|colour|red", "1")]));
    }

    #[test]
    fn test_expand() {
        let expanded = sales().expand(|cell| {
            Value::from(if cell.content.as_i64() > Some(15) { "big" } else { "small" })
        });
        assert_eq!(expanded.rank(), 3);
        assert_eq!(
            rendered(&expanded),
            expect(&[
                ("north|apple|small", "10"),
                ("north|pear|big", "20"),
                ("south|apple|big", "30"),
                ("south|fig|small", "5"),
            ])
        );
    }

    proptest! {
        #[test]
        fn fill_is_dense(cells in gen_cells(3, 12)) {
            let m = Matrix::from_cells(3, cells).unwrap();
            let mut filled: Vec<Position> = m
                .fill(&Content::discrete(0))
                .cells()
                .iter()
                .map(|cell| cell.position.clone())
                .collect();
            filled.sort();
            let mut domain = m.domain().into_vec();
            domain.sort();
            prop_assert_eq!(filled, domain);
        }
    }
}
