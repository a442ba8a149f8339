/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use crate::cell::Cell;
use crate::content::Content;
use crate::value::Value;

/// Rewrite the content of a cell, independently of every other cell.
/// Returning `None` drops the cell.
pub trait Transformer<V: ?Sized = ()> {
    fn present(&self, cell: &Cell, value: &V) -> Option<Content>;
}

/// Rewrite the content of a cell into any number of contents, each
/// under a coordinate appended to the cell's position.
pub trait ExpandingTransformer<V: ?Sized = ()> {
    fn present_expanded(&self, cell: &Cell, value: &V) -> Vec<(Value, Content)>;
}

impl<V: ?Sized, T: ExpandingTransformer<V>> ExpandingTransformer<V> for Vec<T> {
    fn present_expanded(&self, cell: &Cell, value: &V) -> Vec<(Value, Content)> {
        self.iter()
            .flat_map(|transformer| transformer.present_expanded(cell, value))
            .collect()
    }
}

impl<V: ?Sized, A: ExpandingTransformer<V>, B: ExpandingTransformer<V>> ExpandingTransformer<V>
    for (A, B)
{
    fn present_expanded(&self, cell: &Cell, value: &V) -> Vec<(Value, Content)> {
        let mut presented = self.0.present_expanded(cell, value);
        presented.extend(self.1.present_expanded(cell, value));
        presented
    }
}
