/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Reducers fold the cells of a group into an aggregate.
//!
//! A reduction runs in two phases. Every cell is first mapped to a
//! seed with [`Reducer::prepare`], keyed by the selected part of its
//! position. Seeds sharing a key are then combined with
//! [`Reducer::reduce`]. The engine combines seeds in any order and
//! any grouping (partially before the shuffle, partially after), so
//! `reduce` must be associative and commutative.
//!
//! The final aggregate of a key is turned into output by
//! [`PresentSingle`] (at most one content per key) or
//! [`PresentMultiple`] (any number of contents, each under an
//! additional coordinate). Returning nothing signals that the reducer
//! is undefined for the group's contents.
//!
//! Tuples of reducers and `Vec`s of reducers are reducers too: their
//! states are combined element-wise, so several statistics are
//! computed in a single pass.

use crate::cell::Cell;
use crate::content::Content;
use crate::position::Position;
use crate::slice::Slice;
use crate::value::Value;

/// Fold cells to an aggregate. `V` is the type of a broadcast value
/// available to [`Reducer::prepare`]; reducers that do not use one
/// implement the trait for every `V`.
pub trait Reducer<V: ?Sized = ()> {
    /// The aggregate.
    type State;

    /// The seed contributed by one cell.
    fn prepare(&self, slice: &Slice, cell: &Cell, value: &V) -> Self::State;

    /// Combine two aggregates. Must be associative and commutative.
    fn reduce(&self, left: Self::State, right: Self::State) -> Self::State;
}

/// Present an aggregate as at most one content.
pub trait PresentSingle<V: ?Sized = ()>: Reducer<V> {
    fn present_single(&self, key: &Position, state: Self::State) -> Option<Content>;
}

/// Present an aggregate as any number of contents, each under a
/// coordinate appended to the key.
pub trait PresentMultiple<V: ?Sized = ()>: Reducer<V> {
    fn present_multiple(&self, key: &Position, state: Self::State) -> Vec<(Value, Content)>;
}

/// Present a single-valued reducer under a fixed coordinate, so it
/// can take part in an expanding reduction.
#[derive(Clone, Debug)]
pub struct Named<R> {
    name: Value,
    reducer: R,
}

impl<R> Named<R> {
    pub fn new(name: impl Into<Value>, reducer: R) -> Self {
        Self {
            name: name.into(),
            reducer,
        }
    }
}

impl<V: ?Sized, R: Reducer<V>> Reducer<V> for Named<R> {
    type State = R::State;

    fn prepare(&self, slice: &Slice, cell: &Cell, value: &V) -> Self::State {
        self.reducer.prepare(slice, cell, value)
    }

    fn reduce(&self, left: Self::State, right: Self::State) -> Self::State {
        self.reducer.reduce(left, right)
    }
}

impl<V: ?Sized, R: PresentSingle<V>> PresentMultiple<V> for Named<R> {
    fn present_multiple(&self, key: &Position, state: Self::State) -> Vec<(Value, Content)> {
        self.reducer
            .present_single(key, state)
            .map(|content| (self.name.clone(), content))
            .into_iter()
            .collect()
    }
}

macro_rules! reducer_tuple {
    ($($name:ident: $index:tt),+) => {
        impl<V: ?Sized, $($name: Reducer<V>),+> Reducer<V> for ($($name,)+) {
            type State = ($($name::State,)+);

            fn prepare(&self, slice: &Slice, cell: &Cell, value: &V) -> Self::State {
                ($(self.$index.prepare(slice, cell, value),)+)
            }

            fn reduce(&self, left: Self::State, right: Self::State) -> Self::State {
                ($(self.$index.reduce(left.$index, right.$index),)+)
            }
        }

        impl<V: ?Sized, $($name: PresentMultiple<V>),+> PresentMultiple<V> for ($($name,)+) {
            fn present_multiple(
                &self,
                key: &Position,
                state: Self::State,
            ) -> Vec<(Value, Content)> {
                let mut presented = Vec::new();
                $(presented.extend(self.$index.present_multiple(key, state.$index));)+
                presented
            }
        }
    };
}

reducer_tuple!(A: 0, B: 1);
reducer_tuple!(A: 0, B: 1, C: 2);
reducer_tuple!(A: 0, B: 1, C: 2, D: 3);
reducer_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);

impl<V: ?Sized, R: Reducer<V>> Reducer<V> for Vec<R> {
    type State = Vec<R::State>;

    fn prepare(&self, slice: &Slice, cell: &Cell, value: &V) -> Self::State {
        self.iter()
            .map(|reducer| reducer.prepare(slice, cell, value))
            .collect()
    }

    fn reduce(&self, left: Self::State, right: Self::State) -> Self::State {
        self.iter()
            .zip(left.into_iter().zip(right))
            .map(|(reducer, (left, right))| reducer.reduce(left, right))
            .collect()
    }
}

impl<V: ?Sized, R: PresentMultiple<V>> PresentMultiple<V> for Vec<R> {
    fn present_multiple(&self, key: &Position, state: Self::State) -> Vec<(Value, Content)> {
        self.iter()
            .zip(state)
            .flat_map(|(reducer, state)| reducer.present_multiple(key, state))
            .collect()
    }
}
