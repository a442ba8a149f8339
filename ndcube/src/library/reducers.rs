/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Reducers over the numeric aggregates of [`crate::algebra`].
//!
//! A non-numeric content contributes NaN, which absorbs every other
//! aggregate; the reducer then presents nothing for its key.

use crate::algebra;
use crate::algebra::Semigroup;
use crate::cell::Cell;
use crate::content::Content;
use crate::position::Position;
use crate::reducer::PresentSingle;
use crate::reducer::Reducer;
use crate::slice::Slice;

fn numeric(cell: &Cell) -> f64 {
    cell.content.as_f64().unwrap_or(f64::NAN)
}

fn defined(value: f64) -> Option<Content> {
    (!value.is_nan()).then(|| Content::continuous(value))
}

/// Number of cells, of any kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl<V: ?Sized> Reducer<V> for Count {
    type State = algebra::Count;

    fn prepare(&self, _slice: &Slice, _cell: &Cell, _value: &V) -> Self::State {
        algebra::Count(1)
    }

    fn reduce(&self, left: Self::State, right: Self::State) -> Self::State {
        left.combine(&right)
    }
}

impl<V: ?Sized> PresentSingle<V> for Count {
    fn present_single(&self, _key: &Position, state: Self::State) -> Option<Content> {
        Some(Content::discrete(state.0 as i64))
    }
}

/// Sum of numeric contents.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl<V: ?Sized> Reducer<V> for Sum {
    type State = algebra::Sum;

    fn prepare(&self, _slice: &Slice, cell: &Cell, _value: &V) -> Self::State {
        algebra::Sum(numeric(cell))
    }

    fn reduce(&self, left: Self::State, right: Self::State) -> Self::State {
        left.combine(&right)
    }
}

impl<V: ?Sized> PresentSingle<V> for Sum {
    fn present_single(&self, _key: &Position, state: Self::State) -> Option<Content> {
        defined(state.0)
    }
}

/// Smallest numeric content.
#[derive(Clone, Copy, Debug, Default)]
pub struct Min;

impl<V: ?Sized> Reducer<V> for Min {
    type State = algebra::Min;

    fn prepare(&self, _slice: &Slice, cell: &Cell, _value: &V) -> Self::State {
        algebra::Min(numeric(cell))
    }

    fn reduce(&self, left: Self::State, right: Self::State) -> Self::State {
        left.combine(&right)
    }
}

impl<V: ?Sized> PresentSingle<V> for Min {
    fn present_single(&self, _key: &Position, state: Self::State) -> Option<Content> {
        defined(state.0)
    }
}

/// Largest numeric content.
#[derive(Clone, Copy, Debug, Default)]
pub struct Max;

impl<V: ?Sized> Reducer<V> for Max {
    type State = algebra::Max;

    fn prepare(&self, _slice: &Slice, cell: &Cell, _value: &V) -> Self::State {
        algebra::Max(numeric(cell))
    }

    fn reduce(&self, left: Self::State, right: Self::State) -> Self::State {
        left.combine(&right)
    }
}

impl<V: ?Sized> PresentSingle<V> for Max {
    fn present_single(&self, _key: &Position, state: Self::State) -> Option<Content> {
        defined(state.0)
    }
}
