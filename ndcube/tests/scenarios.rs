/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! End-to-end checks through the public API.

use chrono::NaiveDate;
use ndcube::Cell;
use ndcube::Comparer;
use ndcube::Content;
use ndcube::Dimension;
use ndcube::Matrix;
use ndcube::MatrixError;
use ndcube::Partitioner;
use ndcube::Position;
use ndcube::Slice;
use ndcube::Value;
use ndcube::library::derivers::Gradient;
use ndcube::library::operators::Arithmetic;
use ndcube::library::partitioners::BinaryHashSplit;
use ndcube::library::reducers::Count;
use ndcube::library::reducers::Sum;

fn small() -> Matrix {
    Matrix::from_pairs(
        2,
        [
            ((1, "a"), Content::discrete(10)),
            ((1, "b"), Content::discrete(20)),
            ((2, "a"), Content::discrete(30)),
        ],
    )
    .unwrap()
}

#[test]
fn binary_hash_split_follows_the_hash_bucket() {
    let cell = Cell::new((1, "b"), Content::discrete(1));
    let split = BinaryHashSplit::new(Dimension::FIRST, 50, "L", "R", 100).unwrap();
    let expected = if (Value::from(1).hash_code() % 100).abs() <= 50 {
        "L"
    } else {
        "R"
    };
    assert_eq!(Partitioner::<()>::assign(&split, &cell, &()), vec![expected]);
}

#[test]
fn sum_over_first_dimension() {
    let over = Slice::over(Dimension::FIRST, 2).unwrap();
    let totals = small().reduce(&over, &Sum).unwrap();
    assert_eq!(totals.rank(), 1);
    assert_eq!(
        totals.to_sorted_vec(),
        vec![
            Cell::new((1,), Content::continuous(30.0)),
            Cell::new((2,), Content::continuous(30.0)),
        ]
    );
}

#[test]
fn melt_third_into_second() {
    let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let m = Matrix::from_pairs(3, [((1, "a", date), Content::discrete(1))]).unwrap();
    let melted = m.melt(Dimension::THIRD, Dimension::SECOND, ".").unwrap();
    let cells = melted.to_sorted_vec();
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].position, Position::from((1, "a.2020-01-01")));
}

#[test]
fn gradient_over_a_date_axis() {
    let day = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap();
    let m = Matrix::from_pairs(
        2,
        [
            (("x", day(1)), Content::discrete(10)),
            (("x", day(3)), Content::discrete(16)),
        ],
    )
    .unwrap();
    let over = Slice::over(Dimension::FIRST, 2).unwrap();
    let cells = m.derive(&over, &Gradient).unwrap().to_sorted_vec();
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].content.as_f64(), Some(3.0));
}

#[test]
fn operators_chain() {
    let along = Slice::along(Dimension::FIRST, 2).unwrap();
    let counts = small().reduce(&along, &Count).unwrap();
    assert_eq!(
        counts.to_sorted_vec(),
        vec![
            Cell::new(("a",), Content::discrete(2)),
            Cell::new(("b",), Content::discrete(1)),
        ]
    );

    let over = Slice::over(Dimension::FIRST, 2).unwrap();
    let differences = small()
        .pairwise(&over, Comparer::Upper, &Arithmetic::Minus)
        .unwrap();
    assert_eq!(
        differences.to_sorted_vec(),
        vec![Cell::new(("(2-1)", "a"), Content::continuous(20.0))]
    );
}

#[test]
fn invalid_arguments_fail_before_any_work() {
    let wrong = Slice::over(Dimension::FIRST, 3).unwrap();
    assert_eq!(
        small().reduce(&wrong, &Sum).unwrap_err(),
        MatrixError::SliceRank { slice: 3, rank: 2 }
    );
    assert!(small().permute(&[Dimension::SECOND]).is_err());
}
