/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use crate::cell::Cell;

/// Route a cell to zero, one or many partitions.
pub trait Partitioner<V: ?Sized = ()> {
    /// Partition label.
    type Label;

    fn assign(&self, cell: &Cell, value: &V) -> Vec<Self::Label>;
}
