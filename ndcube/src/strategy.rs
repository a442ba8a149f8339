/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Property-based generators for [`Position`], [`Slice`] and
//! [`Cell`] inputs.
//!
//! Coordinates are drawn from small domains so that generated cells
//! collide on slices often enough for keyed operators to group them.
//!
//! Example usage:
//!
//! ```
//! use proptest::prelude::*;
//!
//! use crate::strategy::gen_cells;
//!
//! proptest! {
//!     #[test]
//!     fn test_cells(cells in gen_cells(3, 8)) {
//!         // Use `cells` to build a matrix of rank 3
//!     }
//! }
//! ```
//!
//! This module is only included in test builds (`#[cfg(test)]`).

use chrono::NaiveDate;
use proptest::prelude::*;

use crate::Cell;
use crate::Content;
use crate::Dimension;
use crate::Position;
use crate::Slice;
use crate::Value;

/// Generates a coordinate: a small integer, a one-letter string, a
/// date in early 2020 or a double.
pub fn gen_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0i64..3).prop_map(Value::from),
        prop::sample::select(vec!["a", "b", "c"]).prop_map(Value::from),
        (1u32..4).prop_map(|day| {
            Value::from(NaiveDate::from_ymd_opt(2020, 1, day).unwrap())
        }),
        prop::sample::select(vec![0.5, 1.5]).prop_map(Value::from),
    ]
}

/// Generates a position with between 1 and `max_rank` coordinates.
pub fn gen_position(max_rank: usize) -> impl Strategy<Value = Position> {
    prop::collection::vec(gen_value(), 1..=max_rank).prop_map(Position::new)
}

/// Generates a position together with a slice of its rank. The slice
/// selects an arbitrary subset of the dimensions, possibly none or
/// all of them.
pub fn gen_position_and_slice(max_rank: usize) -> impl Strategy<Value = (Position, Slice)> {
    gen_position(max_rank).prop_flat_map(|position| {
        let rank = position.rank();
        prop::collection::vec(any::<bool>(), rank).prop_map(move |mask| {
            let dims: Vec<Dimension> = mask
                .iter()
                .enumerate()
                .filter(|(_, selected)| **selected)
                .map(|(index, _)| Dimension::at(index))
                .collect();
            let slice = Slice::over_dims(&dims, rank).unwrap();
            (position.clone(), slice)
        })
    })
}

/// Generates up to `max_cells` cells of exactly `rank` dimensions
/// with unique positions and discrete contents.
pub fn gen_cells(rank: usize, max_cells: usize) -> impl Strategy<Value = Vec<Cell>> {
    let coordinate = prop_oneof![
        (0i64..3).prop_map(Value::from),
        prop::sample::select(vec!["a", "b", "c"]).prop_map(Value::from),
    ];
    prop::collection::btree_map(
        prop::collection::vec(coordinate, rank).prop_map(Position::new),
        -100i64..100,
        0..=max_cells,
    )
    .prop_map(|cells| {
        cells
            .into_iter()
            .map(|(position, content)| Cell::new(position, Content::discrete(content)))
            .collect()
    })
}
