/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::cmp::Ordering;

use crate::cell::Cell;
use crate::position::Dimension;
use crate::squasher::Squasher;
use crate::value::Value;

// Colliding cells differ in the squashed coordinate unless the
// matrix holds duplicate positions; canonical strings break the tie
// so the choice never depends on fold order.
fn compare(dim: Dimension, left: &Cell, right: &Cell) -> Ordering {
    left.position
        .get(dim)
        .ok()
        .cmp(&right.position.get(dim).ok())
        .then_with(|| {
            left.content
                .canonical_string()
                .cmp(&right.content.canonical_string())
        })
}

/// Keep the cell with the largest coordinate along the squashed
/// dimension.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreservingMaxPosition;

impl<V: ?Sized> Squasher<V> for PreservingMaxPosition {
    fn reduce(&self, dim: Dimension, left: Cell, right: Cell, _value: &V) -> Cell {
        match compare(dim, &left, &right) {
            Ordering::Less => right,
            _ => left,
        }
    }
}

/// Keep the cell with the smallest coordinate along the squashed
/// dimension.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreservingMinPosition;

impl<V: ?Sized> Squasher<V> for PreservingMinPosition {
    fn reduce(&self, dim: Dimension, left: Cell, right: Cell, _value: &V) -> Cell {
        match compare(dim, &left, &right) {
            Ordering::Greater => right,
            _ => left,
        }
    }
}

/// Keep the cell whose coordinate along the squashed dimension is
/// `coordinate`.
///
/// This squasher is order-sensitive: when neither cell (or both)
/// match it keeps the left one, so keys without a matching cell end
/// up with whichever cell the fold visits first.
#[derive(Clone, Debug)]
pub struct KeepSlice {
    coordinate: Value,
}

impl KeepSlice {
    pub fn new(coordinate: impl Into<Value>) -> Self {
        Self {
            coordinate: coordinate.into(),
        }
    }
}

impl<V: ?Sized> Squasher<V> for KeepSlice {
    fn reduce(&self, dim: Dimension, left: Cell, right: Cell, _value: &V) -> Cell {
        let matches = |cell: &Cell| cell.position.get(dim).ok() == Some(&self.coordinate);
        if !matches(&left) && matches(&right) {
            right
        } else {
            left
        }
    }
}
