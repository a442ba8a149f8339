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
use crate::deriver::Deriver;
use crate::slice::Slice;

impl Matrix {
    /// Scan the cells of every selected key in ascending order of
    /// their remainder, carrying the deriver's state.
    ///
    /// Outputs are placed at the key extended with the coordinate the
    /// deriver returns, so the result has the rank of the selected
    /// part plus one. The first cell of a key only seeds the state; a
    /// key with a single cell yields nothing.
    pub fn derive<D: Deriver>(&self, slice: &Slice, deriver: &D) -> Result<Matrix, MatrixError> {
        self.derive_with_value(slice, deriver, &())
    }

    /// [`Matrix::derive`] with a broadcast value.
    pub fn derive_with_value<V: ?Sized, D: Deriver<V>>(
        &self,
        slice: &Slice,
        deriver: &D,
        value: &V,
    ) -> Result<Matrix, MatrixError> {
        self.check_slice(slice)?;
        tracing::debug!(operation = "derive", rank = self.rank, %slice);
        let cells = self
            .cells
            .map(|cell| {
                (
                    slice.selected(&cell.position),
                    (slice.remainder(&cell.position), cell.clone()),
                )
            })
            .group_sorted_by(|(remainder, _)| remainder.clone())
            .into_flat_map(|(key, group)| {
                let ((remainder, first), rest) = group.split();
                let mut state = deriver.initialise(slice, &first, &remainder, value);
                let mut derived = Vec::new();
                for (remainder, cell) in rest {
                    let (next, presented) = deriver.present(slice, &cell, &remainder, state, value);
                    state = next;
                    derived.extend(presented.into_iter().map(|(coordinate, content)| {
                        Cell::new(key.append(coordinate), content)
                    }));
                }
                derived
            });
        Ok(Matrix::derived(slice.selected_rank() + 1, cells))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;
    use crate::content::Content;
    use crate::library::derivers::CumulativeSum;
    use crate::library::derivers::Gradient;
    use crate::matrix::testing::expect;
    use crate::matrix::testing::rendered;
    use crate::position::Dimension;
    use crate::position::Position;
    use crate::strategy::gen_cells;
    use crate::value::Value;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    #[test]
    fn test_gradient_over_dates() {
        let m = Matrix::from_pairs(
            2,
            [
                (("x", day(1)), Content::discrete(10)),
                (("x", day(3)), Content::discrete(16)),
                (("x", day(4)), Content::discrete(10)),
            ],
        )
        .unwrap();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        assert_eq!(
            rendered(&m.derive(&over, &Gradient).unwrap()),
            expect(&[
                ("x|2020-01-01.2020-01-03", "3"),
                ("x|2020-01-03.2020-01-04", "-6"),
            ])
        );
    }

    #[test]
    fn test_scan_follows_remainder_order() {
        // Inserted out of order; the scan sorts by remainder.
        let m = Matrix::from_pairs(
            2,
            [
                (("a", 3), Content::discrete(3)),
                (("a", 1), Content::discrete(1)),
                (("a", 2), Content::discrete(2)),
                (("b", 1), Content::discrete(7)),
            ],
        )
        .unwrap();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        assert_eq!(
            rendered(&m.derive(&over, &CumulativeSum).unwrap()),
            expect(&[("a|2", "3"), ("a|3", "6")])
        );
    }

    /// Changes between consecutive cells whose size reaches the
    /// broadcast threshold, placed under the later remainder.
    struct Jump;

    impl Deriver<f64> for Jump {
        type State = Option<f64>;

        fn initialise(
            &self,
            _slice: &Slice,
            cell: &Cell,
            _remainder: &Position,
            _threshold: &f64,
        ) -> Self::State {
            cell.content.as_f64()
        }

        fn present(
            &self,
            _slice: &Slice,
            cell: &Cell,
            remainder: &Position,
            last: Self::State,
            threshold: &f64,
        ) -> (Self::State, Vec<(Value, Content)>) {
            let current = cell.content.as_f64();
            let jump = last
                .zip(current)
                .map(|(last, current)| current - last)
                .filter(|delta| delta.abs() >= *threshold)
                .map(|delta| (remainder.coordinates()[0].clone(), Content::continuous(delta)));
            (current, jump.into_iter().collect())
        }
    }

    #[test]
    fn test_derive_with_value() {
        let m = Matrix::from_pairs(
            2,
            [
                (("a", 1), Content::discrete(1)),
                (("a", 2), Content::discrete(5)),
                (("a", 3), Content::discrete(6)),
                (("a", 4), Content::discrete(2)),
            ],
        )
        .unwrap();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        assert_eq!(
            rendered(&m.derive_with_value(&over, &Jump, &2.0).unwrap()),
            expect(&[("a|2", "4"), ("a|4", "-4")])
        );
        assert!(m.derive_with_value(&over, &Jump, &10.0).unwrap().is_empty());
    }

    #[test]
    fn test_gradient_over_mixed_numeric_axis() {
        // Integer and fractional coordinates interleave by magnitude.
        let m = Matrix::from_pairs(
            2,
            [
                (("x", Value::from(1)), Content::discrete(1)),
                (("x", Value::from(2)), Content::discrete(3)),
                (("x", Value::from(1.5)), Content::discrete(2)),
            ],
        )
        .unwrap();
        let over = Slice::over(Dimension::FIRST, 2).unwrap();
        assert_eq!(
            rendered(&m.derive(&over, &Gradient).unwrap()),
            expect(&[("x|1.1.5", "2"), ("x|1.5.2", "2")])
        );
    }

    proptest! {
        #[test]
        fn single_cell_keys_derive_nothing(cells in gen_cells(2, 12)) {
            let m = Matrix::from_cells(2, cells).unwrap();
            let over = Slice::over(Dimension::FIRST, 2).unwrap();
            let derived = m.derive(&over, &CumulativeSum).unwrap();

            let mut counts = std::collections::BTreeMap::<Position, usize>::new();
            for cell in m.cells().iter() {
                *counts.entry(over.selected(&cell.position)).or_default() += 1;
            }
            for cell in derived.cells().iter() {
                let key = cell.position.remove(Dimension::SECOND).unwrap();
                prop_assert!(counts[&key] > 1);
            }
            let expected: usize = counts.values().map(|n| n - 1).sum();
            prop_assert_eq!(derived.len(), expected);
        }
    }
}
