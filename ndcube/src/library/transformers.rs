/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::collections::HashMap;

use crate::cell::Cell;
use crate::content::Content;
use crate::content::Kind;
use crate::position::Dimension;
use crate::transformer::ExpandingTransformer;
use crate::transformer::Transformer;
use crate::value::Value;

/// Replace every content with the discrete value `1`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Indicator;

impl<V: ?Sized> Transformer<V> for Indicator {
    fn present(&self, _cell: &Cell, _value: &V) -> Option<Content> {
        Some(Content::discrete(1))
    }
}

/// Divide numeric contents by a scale looked up, in the broadcast
/// map, by the cell's coordinate at `dim`. Cells without a numeric
/// content, without a scale, or with a zero scale are dropped.
#[derive(Clone, Copy, Debug)]
pub struct Normalise {
    dim: Dimension,
}

impl Normalise {
    pub fn new(dim: Dimension) -> Self {
        Self { dim }
    }
}

impl Transformer<HashMap<Value, f64>> for Normalise {
    fn present(&self, cell: &Cell, scales: &HashMap<Value, f64>) -> Option<Content> {
        let coordinate = cell.position.get(self.dim).ok()?;
        let scale = scales.get(coordinate).copied().filter(|scale| *scale != 0.0)?;
        Some(Content::continuous(cell.content.as_f64()? / scale))
    }
}

/// Turn a categorical content into the indicator `1` under a new
/// coordinate naming the category. Other contents are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct Binarise;

impl<V: ?Sized> ExpandingTransformer<V> for Binarise {
    fn present_expanded(&self, cell: &Cell, _value: &V) -> Vec<(Value, Content)> {
        if cell.content.kind().is_specialisation_of(Kind::Categorical) {
            vec![(cell.content.value().clone(), Content::discrete(1))]
        } else {
            Vec::new()
        }
    }
}
