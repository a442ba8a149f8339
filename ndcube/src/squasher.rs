/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use crate::cell::Cell;
use crate::position::Dimension;

/// Pick the survivor of two cells that collide once `dim` is removed
/// from their positions.
///
/// The engine folds colliding cells in an unspecified order. A
/// squasher whose `reduce` is not associative and commutative
/// (e.g. one that prefers whichever cell it sees first) yields an
/// order-dependent result and must say so.
pub trait Squasher<V: ?Sized = ()> {
    fn reduce(&self, dim: Dimension, left: Cell, right: Cell, value: &V) -> Cell;
}
